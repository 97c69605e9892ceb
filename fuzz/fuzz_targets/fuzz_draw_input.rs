#![no_main]

//! Fuzz target for draw input handling.
//!
//! Any text typed into the draw prompt must either show exactly the ticket
//! it names or leave the session untouched, and never panic.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::io;

use ticket_to_now::catalog::Catalogs;
use ticket_to_now::controller::{parse_ticket_number, App};
use ticket_to_now::db::Database;
use ticket_to_now::store::SessionStore;
use ticket_to_now::terminal::TerminalView;
use ticket_to_now::view::{Platform, Screen};

#[derive(Arbitrary, Debug)]
struct DrawInput {
    /// Raw text as typed by the user
    raw: String,
    /// Save the ticket afterwards
    save: bool,
}

fuzz_target!(|input: DrawInput| {
    let db = match Database::open_in_memory() {
        Ok(db) => db,
        Err(_) => return,
    };

    let mut app = App::new(
        SessionStore::new(db),
        Catalogs::embedded(),
        Platform::none(),
        TerminalView::new(io::sink(), false),
    );

    if app.draw(&input.raw).is_err() {
        return;
    }

    match parse_ticket_number(&input.raw) {
        Some(id) => {
            assert_eq!(app.session().current().map(|t| t.id), Some(id));
            assert_eq!(app.session().screen(), Screen::Result);
        }
        None => {
            assert!(app.session().current().is_none());
            assert_eq!(app.session().screen(), Screen::Main);
        }
    }

    if input.save {
        let _ = app.save();
        let _ = app.save();
        if let Ok(saved) = app.store().list_saved() {
            assert!(saved.len() <= 1);
        }
    }
});
