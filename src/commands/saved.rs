use anyhow::{bail, Result};

use crate::controller::App;
use crate::view::View;

pub fn list<V: View>(app: &mut App<V>) -> Result<()> {
    app.show_saved_list()
}

pub fn open<V: View>(app: &mut App<V>, id: u32) -> Result<()> {
    if !app.load_saved_ticket(id)? {
        bail!("Ticket #{} is not in the catalog or your saved list", id);
    }
    Ok(())
}
