use anyhow::{bail, Context, Result};
use rand::Rng;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::models::{is_valid_ticket_id, BreathPattern, Ticket};

pub const DEFAULT_TICKETS_JSON: &str = include_str!("../data/tickets.json");
pub const DEFAULT_BREATH_JSON: &str = include_str!("../data/breath.json");

pub const DEFAULT_PATTERN: &str = "gentle";

#[derive(Debug, Clone, Default)]
pub struct TicketCatalog {
    tickets: Vec<Ticket>,
    by_id: HashMap<u32, usize>,
}

impl TicketCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let tickets: Vec<Ticket> =
            serde_json::from_str(json).context("Ticket catalog is not a valid ticket array")?;
        Self::from_tickets(tickets)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read ticket catalog {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn embedded() -> Result<Self> {
        Self::from_json(DEFAULT_TICKETS_JSON)
    }

    pub fn from_tickets(tickets: Vec<Ticket>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(tickets.len());
        for (index, ticket) in tickets.iter().enumerate() {
            if !is_valid_ticket_id(ticket.id as i64) {
                bail!("Ticket id {} is outside 1-500", ticket.id);
            }
            if by_id.insert(ticket.id, index).is_some() {
                bail!("Duplicate ticket id {}", ticket.id);
            }
        }
        Ok(TicketCatalog { tickets, by_id })
    }

    pub fn find(&self, id: u32) -> Option<&Ticket> {
        self.by_id.get(&id).map(|&i| &self.tickets[i])
    }

    pub fn random(&self) -> Option<&Ticket> {
        if self.tickets.is_empty() {
            return None;
        }
        let index = rand::rng().random_range(0..self.tickets.len());
        self.tickets.get(index)
    }

}

#[derive(Debug, Clone, Default)]
pub struct BreathTable {
    patterns: BTreeMap<String, BreathPattern>,
}

impl BreathTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let patterns: BTreeMap<String, BreathPattern> =
            serde_json::from_str(json).context("Breath table is not a valid pattern object")?;

        for (key, entry) in &patterns {
            if !entry.pattern.is_valid() {
                bail!(
                    "Breath pattern '{}' needs inhale and exhale longer than zero",
                    key
                );
            }
        }

        Ok(BreathTable { patterns })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read breath table {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn embedded() -> Result<Self> {
        Self::from_json(DEFAULT_BREATH_JSON)
    }

    pub fn find(&self, key: &str) -> Option<&BreathPattern> {
        self.patterns.get(key)
    }
}

/// Both tables as loaded at startup. A table that failed to load is `None`
/// and the failure is kept for a single report to the user.
#[derive(Debug, Default)]
pub struct Catalogs {
    pub tickets: Option<TicketCatalog>,
    pub patterns: Option<BreathTable>,
    pub load_error: Option<String>,
}

impl Catalogs {
    /// Load from the given files, falling back to the embedded data for any
    /// path not supplied.
    pub fn load(tickets_path: Option<&Path>, breath_path: Option<&Path>) -> Self {
        let tickets = match tickets_path {
            Some(path) => TicketCatalog::load(path),
            None => TicketCatalog::embedded(),
        };
        let patterns = match breath_path {
            Some(path) => BreathTable::load(path),
            None => BreathTable::embedded(),
        };

        let mut errors = Vec::new();
        let tickets = tickets.map_err(|e| errors.push(format!("{:#}", e))).ok();
        let patterns = patterns.map_err(|e| errors.push(format!("{:#}", e))).ok();

        Catalogs {
            tickets,
            patterns,
            load_error: (!errors.is_empty()).then(|| errors.join("; ")),
        }
    }

    pub fn embedded() -> Self {
        Self::load(None, None)
    }
}
