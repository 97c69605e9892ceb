use serde::{Deserialize, Serialize};

pub const MIN_TICKET_ID: u32 = 1;
pub const MAX_TICKET_ID: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u32,
    pub theme: String,
    pub title: String,
    pub content: String,
    pub question: String,
    pub breath: String,
    pub color: String,
}

impl Ticket {
    /// The ticket shown for an in-range number the catalog has no entry for.
    pub fn fallback(id: u32) -> Self {
        Ticket {
            id,
            theme: "當下流域".to_string(),
            title: "回到呼吸".to_string(),
            content: "此刻就是最好的時刻。".to_string(),
            question: "我現在需要什麼？".to_string(),
            breath: "focus".to_string(),
            color: "#E8F0F8".to_string(),
        }
    }

    pub fn share_text(&self) -> String {
        format!(
            "{}\n{}\n\n— Ticket to Now #{}",
            self.title, self.content, self.id
        )
    }
}

pub fn is_valid_ticket_id(id: i64) -> bool {
    (MIN_TICKET_ID as i64..=MAX_TICKET_ID as i64).contains(&id)
}

/// Seconds spent in each stage of one breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub inhale: u32,
    pub hold: u32,
    pub exhale: u32,
}

impl Pattern {
    /// Widened so any three stage lengths fit.
    pub fn cycle_len(&self) -> u64 {
        self.inhale as u64 + self.hold as u64 + self.exhale as u64
    }

    pub fn is_valid(&self) -> bool {
        self.inhale > 0 && self.exhale > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathPattern {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub pattern: Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(rename = "savedAt")]
    pub saved_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayRecord {
    pub ticket: Ticket,
    pub date: String,
}
