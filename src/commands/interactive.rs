use anyhow::Result;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::error;

use crate::commands::breathe;
use crate::controller::{App, MSG_INVALID_NUMBER};
use crate::view::View;

pub const MSG_STORAGE_FAILED: &str = "儲存資料時發生錯誤";

const HELP: &str = "\
  1-500   用號碼抽一張票
  r       隨機抽一張
  b       開始呼吸練習（Ctrl-C 提前結束）
  s       收藏這張票
  p       分享這張票
  l       打開收藏列表
  o <id>  打開收藏中的票
  c       關閉收藏列表
  m       回到主畫面
  h       顯示說明
  q       離開（在提示字元按 Ctrl-C 後再按 Enter 也會離開）";

#[derive(Debug, PartialEq, Eq)]
enum Action<'a> {
    Draw(&'a str),
    Random,
    Breathe,
    Save,
    Share,
    List,
    Open(&'a str),
    Close,
    Main,
    Help,
    Quit,
    Nothing,
}

fn parse_action(line: &str) -> Action<'_> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" => Action::Nothing,
        "r" | "random" => Action::Random,
        "b" | "breathe" => Action::Breathe,
        "s" | "save" => Action::Save,
        "p" | "share" => Action::Share,
        "l" | "list" => Action::List,
        "o" | "open" => Action::Open(rest),
        "c" | "close" => Action::Close,
        "m" | "main" | "back" => Action::Main,
        "h" | "help" | "?" => Action::Help,
        "q" | "quit" | "exit" => Action::Quit,
        _ => Action::Draw(line),
    }
}

/// Line-oriented session over `input` until `q` or end of input. Prompts and
/// help go to `out`; everything else goes through the app's view.
pub fn run<V: View, R: BufRead, W: Write>(
    app: &mut App<V>,
    input: R,
    out: &mut W,
    frame_interval: Duration,
    stop: &AtomicBool,
) -> Result<()> {
    writeln!(out, "輸入 1-500 的數字抽一張票，h 顯示說明。")?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;

        // Practices consume their own Ctrl-C, so a raised flag here came from the prompt
        if stop.swap(false, Ordering::SeqCst) {
            writeln!(out, "再見。")?;
            break;
        }

        match parse_action(&line) {
            Action::Quit => break,
            Action::Help => writeln!(out, "{}", HELP)?,
            action => {
                if let Err(e) = dispatch(app, action, frame_interval, stop) {
                    error!("action failed: {:#}", e);
                    app.view_mut().notify(MSG_STORAGE_FAILED);
                }
            }
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    Ok(())
}

fn dispatch<V: View>(
    app: &mut App<V>,
    action: Action<'_>,
    frame_interval: Duration,
    stop: &AtomicBool,
) -> Result<()> {
    match action {
        Action::Draw(raw) => app.draw(raw)?,
        Action::Random => app.draw_random()?,
        Action::Breathe => {
            breathe::run(app, frame_interval, stop);
        }
        Action::Save => app.save()?,
        Action::Share => {
            app.share();
        }
        Action::List => app.show_saved_list()?,
        Action::Open(raw) => match raw.parse::<u32>() {
            Ok(id) => {
                if !app.load_saved_ticket(id)? {
                    app.view_mut().notify(&format!("收藏中找不到 #{}", id));
                }
            }
            Err(_) => app.view_mut().notify(MSG_INVALID_NUMBER),
        },
        Action::Close => app.close_saved_list(),
        Action::Main => app.back_to_main(),
        Action::Help | Action::Quit | Action::Nothing => {}
    }
    Ok(())
}
