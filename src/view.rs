use anyhow::Result;

use crate::breath::BreathState;
use crate::models::{SavedTicket, Ticket};
use crate::theme::Gradient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Result,
    Breath,
}

pub trait View {
    fn set_screen(&mut self, screen: Screen);
    fn render_ticket(&mut self, ticket: &Ticket, gradient: &Gradient);
    fn render_breath(&mut self, state: &BreathState);
    fn render_timer(&mut self, label: &str);
    /// Items arrive newest first.
    fn show_saved_list(&mut self, items: &[SavedTicket]);
    fn hide_saved_list(&mut self);
    fn show_today_hint(&mut self, ticket_id: u32);
    fn notify(&mut self, message: &str);
    fn clear_input(&mut self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

/// A native share sheet.
pub trait ShareSheet {
    fn share(&mut self, payload: &SharePayload) -> Result<()>;
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Optional platform capabilities. A missing capability is skipped exactly
/// like one that fails.
#[derive(Default)]
pub struct Platform {
    pub share: Option<Box<dyn ShareSheet>>,
    pub clipboard: Option<Box<dyn Clipboard>>,
}

impl Platform {
    pub fn none() -> Self {
        Platform::default()
    }
}
