use anyhow::{Context, Result};
use std::io::{self, IsTerminal, Stdout, Write};

use crate::breath::BreathState;
use crate::models::{SavedTicket, Ticket};
use crate::theme::{Gradient, Rgb};
use crate::view::{Clipboard, Platform, Screen, View};

const CARD_WIDTH: usize = 40;
const BAR_WIDTH: usize = 24;

pub struct TerminalView<W: Write> {
    out: W,
    color: bool,
    instruction: Option<&'static str>,
    bar: String,
    timer: String,
    status_line: bool,
}

impl TerminalView<Stdout> {
    pub fn stdout() -> Self {
        let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        TerminalView::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, color: bool) -> Self {
        TerminalView {
            out,
            color,
            instruction: None,
            bar: String::new(),
            timer: String::new(),
            status_line: false,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a line of text outside any in-place status line.
    pub fn println(&mut self, text: &str) {
        self.end_status_line();
        let _ = writeln!(self.out, "{}", text);
    }

    fn end_status_line(&mut self) {
        if self.status_line {
            let _ = writeln!(self.out);
            self.status_line = false;
        }
    }

    fn redraw_status(&mut self) {
        let instruction = self.instruction.unwrap_or("");
        let _ = write!(
            self.out,
            "\r{:>5}  {}  {}",
            self.timer, instruction, self.bar
        );
        if self.color {
            let _ = write!(self.out, "\x1b[K");
        }
        let _ = self.out.flush();
        self.status_line = true;
    }

    fn header(&self, ticket: &Ticket, gradient: &Gradient) -> String {
        let label = format!(" #{} · {} ", ticket.id, ticket.theme);
        if !self.color {
            return format!("[{}]", label.trim());
        }

        let label_chars: Vec<char> = label.chars().collect();
        let mut line = String::new();
        for col in 0..CARD_WIDTH {
            let Rgb { r, g, b } = gradient.at(col as f64 / (CARD_WIDTH - 1) as f64);
            let ch = label_chars.get(col).copied().unwrap_or(' ');
            line.push_str(&format!("\x1b[48;2;{};{};{}m\x1b[30m{}", r, g, b, ch));
        }
        line.push_str("\x1b[0m");
        line
    }
}

/// Bar length tracks the breathing circle's scale; dimmer glyphs for lower
/// opacity.
fn breath_bar(state: &BreathState) -> String {
    let fill = ((state.scale - 0.8) / 0.4 * BAR_WIDTH as f64).round() as usize;
    let glyph = if state.opacity >= 0.7 {
        '●'
    } else if state.opacity >= 0.5 {
        '◉'
    } else {
        '○'
    };
    let fill = fill.clamp(1, BAR_WIDTH);
    let mut bar: String = std::iter::repeat(glyph).take(fill).collect();
    bar.push_str(&" ".repeat(BAR_WIDTH - fill));
    bar
}

impl<W: Write> View for TerminalView<W> {
    fn set_screen(&mut self, screen: Screen) {
        self.end_status_line();
        match screen {
            Screen::Main => {
                let _ = writeln!(self.out, "\n── Ticket to Now ──");
            }
            Screen::Result => {}
            Screen::Breath => {
                self.instruction = None;
                self.bar.clear();
                self.timer.clear();
                let _ = writeln!(self.out, "\n── 呼吸練習 ──  (Ctrl-C 停止)");
            }
        }
    }

    fn render_ticket(&mut self, ticket: &Ticket, gradient: &Gradient) {
        self.end_status_line();
        let header = self.header(ticket, gradient);
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "{}", header);
        let _ = writeln!(self.out, "  {}", ticket.title);
        let _ = writeln!(self.out);
        for line in ticket.content.lines() {
            let _ = writeln!(self.out, "  {}", line);
        }
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "  ？ {}", ticket.question);
    }

    fn render_breath(&mut self, state: &BreathState) {
        self.instruction = Some(state.phase.instruction());
        self.bar = breath_bar(state);
        self.redraw_status();
    }

    fn render_timer(&mut self, label: &str) {
        self.timer = label.to_string();
        self.redraw_status();
    }

    fn show_saved_list(&mut self, items: &[SavedTicket]) {
        self.end_status_line();
        let _ = writeln!(self.out, "\n── 我的收藏 ──");
        if items.is_empty() {
            let _ = writeln!(self.out, "還沒有收藏任何票");
            return;
        }
        for item in items {
            let _ = writeln!(
                self.out,
                "#{:<4} {} · {}",
                item.ticket.id, item.ticket.theme, item.ticket.title
            );
        }
    }

    fn hide_saved_list(&mut self) {}

    fn show_today_hint(&mut self, ticket_id: u32) {
        self.println(&format!("今天你已抽過 #{}，想再抽一張嗎？", ticket_id));
    }

    fn notify(&mut self, message: &str) {
        self.println(&format!("» {}", message));
    }
}

/// System clipboard through `arboard`.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Clipboard not available")?;
        clipboard
            .set_text(text)
            .context("Failed to write to clipboard")?;
        Ok(())
    }
}

pub fn platform() -> Platform {
    Platform {
        share: None,
        clipboard: Some(Box::new(SystemClipboard)),
    }
}
