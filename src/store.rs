use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, SecondsFormat, Utc};
use tracing::debug;

use crate::db::Database;
use crate::models::{SavedTicket, Ticket, TodayRecord};

pub const TODAY_KEY: &str = "todayTicket";
pub const SAVED_KEY: &str = "savedTickets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    AlreadySaved,
}

/// Today's draw and the saved-ticket collection, kept as JSON values in the
/// key/value store.
pub struct SessionStore {
    db: Database,
}

/// Calendar date in the form `Sat Oct 17 2026`.
pub fn date_string(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

pub fn today_string() -> String {
    date_string(Local::now().date_naive())
}

fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl SessionStore {
    pub fn new(db: Database) -> Self {
        SessionStore { db }
    }

    pub fn record_drawn(&self, ticket: &Ticket) -> Result<()> {
        self.record_drawn_on(ticket, &today_string())
    }

    pub fn record_drawn_on(&self, ticket: &Ticket, date: &str) -> Result<()> {
        let record = TodayRecord {
            ticket: ticket.clone(),
            date: date.to_string(),
        };
        let json = serde_json::to_string(&record)?;
        self.db.set_item(TODAY_KEY, &json)?;
        debug!(id = ticket.id, date, "recorded drawn ticket");
        Ok(())
    }

    /// The stored record, whatever day it was drawn on.
    pub fn today_record(&self) -> Result<Option<TodayRecord>> {
        match self.db.get_item(TODAY_KEY)? {
            Some(json) => {
                let record = serde_json::from_str(&json)
                    .with_context(|| format!("Corrupt '{}' entry", TODAY_KEY))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    pub fn drawn_today(&self) -> Result<Option<TodayRecord>> {
        self.drawn_on(&today_string())
    }

    /// The stored record only when it was drawn on `date`. Stale records are
    /// left in storage.
    pub fn drawn_on(&self, date: &str) -> Result<Option<TodayRecord>> {
        Ok(self.today_record()?.filter(|r| r.date == date))
    }

    pub fn list_saved(&self) -> Result<Vec<SavedTicket>> {
        match self.db.get_item(SAVED_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .with_context(|| format!("Corrupt '{}' entry", SAVED_KEY)),
            None => Ok(Vec::new()),
        }
    }

    pub fn find_saved(&self, id: u32) -> Result<Option<SavedTicket>> {
        Ok(self.list_saved()?.into_iter().find(|t| t.ticket.id == id))
    }

    pub fn save(&self, ticket: &Ticket) -> Result<SaveOutcome> {
        let mut saved = self.list_saved()?;

        if saved.iter().any(|t| t.ticket.id == ticket.id) {
            return Ok(SaveOutcome::AlreadySaved);
        }

        saved.push(SavedTicket {
            ticket: ticket.clone(),
            saved_at: timestamp_now(),
        });

        let json = serde_json::to_string(&saved)?;
        self.db.set_item(SAVED_KEY, &json)?;
        debug!(id = ticket.id, total = saved.len(), "saved ticket");
        Ok(SaveOutcome::Saved)
    }
}
