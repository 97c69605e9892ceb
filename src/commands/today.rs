use anyhow::Result;
use std::io::Write;

use crate::store::{today_string, SessionStore};

pub fn run<W: Write>(store: &SessionStore, out: &mut W) -> Result<()> {
    let today = today_string();

    match store.today_record()? {
        Some(record) if record.date == today => {
            let ticket = &record.ticket;
            writeln!(out, "今天抽到 #{} {} · {}", ticket.id, ticket.theme, ticket.title)?;
            writeln!(out, "  {}", ticket.content)?;
        }
        Some(record) => {
            writeln!(out, "今天還沒有抽票。")?;
            writeln!(out, "上一次是 {} 抽到的 #{}", record.date, record.ticket.id)?;
        }
        None => writeln!(out, "今天還沒有抽票。")?,
    }

    Ok(())
}
