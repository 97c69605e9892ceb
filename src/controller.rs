use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::breath::{BreathCycle, Countdown};
use crate::catalog::{BreathTable, Catalogs, TicketCatalog, DEFAULT_PATTERN};
use crate::models::{is_valid_ticket_id, Pattern, Ticket};
use crate::store::{SaveOutcome, SessionStore};
use crate::theme::Gradient;
use crate::view::{Platform, Screen, SharePayload, View};

pub const MSG_INVALID_NUMBER: &str = "也許答案不在數字裡，而在你此刻的呼吸中。";
pub const MSG_LOAD_FAILED: &str = "資料載入失敗，請重新整理頁面";
pub const MSG_BREATH_MISSING: &str = "呼吸引導資料載入失敗";
pub const MSG_PRACTICE_DONE: &str = "練習完成，感受此刻的自己";
pub const MSG_SAVED: &str = "已收藏這句話";
pub const MSG_ALREADY_SAVED: &str = "這張票已經在收藏中了";
pub const MSG_COPIED: &str = "已複製到剪貼簿";
pub const MSG_COPY_FAILED: &str = "複製失敗，請手動複製";
pub const MSG_NO_TICKET: &str = "先抽一張票吧";

pub const SHARE_TITLE: &str = "Ticket to Now";

/// Parse user input as a ticket number. Anything that is not a whole number
/// in 1-500 is rejected.
pub fn parse_ticket_number(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|&n| is_valid_ticket_id(n))
        .map(|n| n as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    Failed,
    NothingToShare,
}

#[derive(Debug)]
struct Practice {
    cycle: BreathCycle,
    /// The one-second ticker. Dropped when the practice stops.
    ticker: Option<Countdown>,
    active: bool,
}

impl Practice {
    fn new(pattern: Pattern) -> Self {
        Practice {
            cycle: BreathCycle::new(pattern),
            ticker: Some(Countdown::default()),
            active: true,
        }
    }

    fn cancel(&mut self) {
        self.ticker = None;
        self.active = false;
    }
}

#[derive(Debug)]
pub struct Session {
    current: Option<Ticket>,
    screen: Screen,
    saved_list_open: bool,
    practice: Option<Practice>,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            current: None,
            screen: Screen::Main,
            saved_list_open: false,
            practice: None,
        }
    }
}

impl Session {
    pub fn current(&self) -> Option<&Ticket> {
        self.current.as_ref()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn saved_list_open(&self) -> bool {
        self.saved_list_open
    }

    pub fn is_practicing(&self) -> bool {
        self.practice.as_ref().is_some_and(|p| p.active)
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.practice
            .as_ref()
            .and_then(|p| p.ticker.as_ref())
            .map(|c| c.remaining())
    }
}

pub struct App<V: View> {
    store: SessionStore,
    tickets: Option<TicketCatalog>,
    patterns: Option<BreathTable>,
    load_error: Option<String>,
    platform: Platform,
    view: V,
    session: Session,
}

impl<V: View> App<V> {
    pub fn new(store: SessionStore, catalogs: Catalogs, platform: Platform, view: V) -> Self {
        App {
            store,
            tickets: catalogs.tickets,
            patterns: catalogs.patterns,
            load_error: catalogs.load_error,
            platform,
            view,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Report a data load failure once, then hint at today's earlier draw.
    pub fn start(&mut self) -> Result<()> {
        if let Some(err) = self.load_error.take() {
            error!(error = %err, "failed to load data");
            self.view.notify(MSG_LOAD_FAILED);
        }
        self.view.set_screen(Screen::Main);
        self.check_today()
    }

    pub fn check_today(&mut self) -> Result<()> {
        if let Some(record) = self.store.drawn_today()? {
            self.view.show_today_hint(record.ticket.id);
        }
        Ok(())
    }

    pub fn draw(&mut self, raw: &str) -> Result<()> {
        let Some(id) = parse_ticket_number(raw) else {
            debug!(input = raw, "rejected draw input");
            self.view.notify(MSG_INVALID_NUMBER);
            return Ok(());
        };

        let Some(catalog) = &self.tickets else {
            self.view.notify(MSG_LOAD_FAILED);
            return Ok(());
        };

        let ticket = match catalog.find(id) {
            Some(ticket) => ticket.clone(),
            None => {
                debug!(id, "ticket not in catalog, using fallback");
                Ticket::fallback(id)
            }
        };
        self.show_ticket(ticket)
    }

    pub fn draw_random(&mut self) -> Result<()> {
        let ticket = self
            .tickets
            .as_ref()
            .and_then(|catalog| catalog.random())
            .cloned();

        match ticket {
            Some(ticket) => self.show_ticket(ticket),
            None => {
                self.view.notify(MSG_LOAD_FAILED);
                Ok(())
            }
        }
    }

    /// Display a ticket on the result screen and remember it as today's draw.
    pub fn show_ticket(&mut self, ticket: Ticket) -> Result<()> {
        info!(id = ticket.id, theme = %ticket.theme, "showing ticket");
        let gradient = Gradient::for_color(&ticket.color);
        self.view.render_ticket(&ticket, &gradient);
        self.set_screen(Screen::Result);
        // Current must match what is shown, even if recording fails
        let ticket = self.session.current.insert(ticket);
        self.store.record_drawn(ticket)?;
        Ok(())
    }

    pub fn back_to_main(&mut self) {
        self.cancel_practice();
        self.set_screen(Screen::Main);
        self.view.clear_input();
    }

    /// Returns false when no pattern could be found and the screen is
    /// unchanged.
    pub fn start_breath_practice(&mut self) -> bool {
        let key = self
            .session
            .current
            .as_ref()
            .map_or(DEFAULT_PATTERN, |t| t.breath.as_str());

        let pattern = self
            .patterns
            .as_ref()
            .and_then(|table| table.find(key))
            .map(|entry| entry.pattern);

        let Some(pattern) = pattern else {
            warn!(pattern = key, "breath pattern not found");
            self.view.notify(MSG_BREATH_MISSING);
            return false;
        };

        info!(
            pattern = key,
            inhale = pattern.inhale,
            hold = pattern.hold,
            exhale = pattern.exhale,
            "starting breath practice"
        );
        self.set_screen(Screen::Breath);
        let practice = Practice::new(pattern);
        if let Some(ticker) = &practice.ticker {
            self.view.render_timer(&ticker.label());
        }
        self.session.practice = Some(practice);
        true
    }

    /// One animation step. Returns false once the practice is no longer
    /// active, at which point the caller stops scheduling frames.
    pub fn animation_frame(&mut self) -> bool {
        if self.session.screen != Screen::Breath {
            return false;
        }
        let state = match self.session.practice.as_mut() {
            Some(practice) if practice.active => practice.cycle.step(),
            _ => return false,
        };
        self.view.render_breath(&state);
        true
    }

    /// One second of the practice countdown. Stops the practice when it runs
    /// out. Returns true while the ticker is still running.
    pub fn countdown_tick(&mut self) -> bool {
        let Some(ticker) = self
            .session
            .practice
            .as_mut()
            .and_then(|p| p.ticker.as_mut())
        else {
            return false;
        };

        let finished = ticker.tick();
        let label = ticker.label();
        self.view.render_timer(&label);

        if finished {
            debug!("countdown finished");
            self.stop_breath_practice();
            return false;
        }
        true
    }

    pub fn stop_breath_practice(&mut self) {
        if !self.session.is_practicing() {
            return;
        }
        self.cancel_practice();
        info!("breath practice finished");
        self.set_screen(Screen::Result);
        self.view.notify(MSG_PRACTICE_DONE);
    }

    fn cancel_practice(&mut self) {
        if let Some(mut practice) = self.session.practice.take() {
            practice.cancel();
        }
    }

    pub fn save(&mut self) -> Result<()> {
        let Some(ticket) = &self.session.current else {
            self.view.notify(MSG_NO_TICKET);
            return Ok(());
        };

        match self.store.save(ticket)? {
            SaveOutcome::Saved => self.view.notify(MSG_SAVED),
            SaveOutcome::AlreadySaved => self.view.notify(MSG_ALREADY_SAVED),
        }
        Ok(())
    }

    /// Share sheet first, then clipboard, then give up. Only the last tier's
    /// failure is shown.
    pub fn share(&mut self) -> ShareOutcome {
        let Some(ticket) = &self.session.current else {
            self.view.notify(MSG_NO_TICKET);
            return ShareOutcome::NothingToShare;
        };

        let payload = SharePayload {
            title: SHARE_TITLE.to_string(),
            text: ticket.share_text(),
        };

        if let Some(sheet) = self.platform.share.as_mut() {
            match sheet.share(&payload) {
                Ok(()) => {
                    info!(id = ticket.id, "shared ticket");
                    return ShareOutcome::Shared;
                }
                Err(e) => debug!(error = %e, "share sheet failed, trying clipboard"),
            }
        }

        match self.platform.clipboard.as_mut() {
            Some(clipboard) => match clipboard.write_text(&payload.text) {
                Ok(()) => {
                    self.view.notify(MSG_COPIED);
                    ShareOutcome::Copied
                }
                Err(e) => {
                    warn!(error = %e, "clipboard write failed");
                    self.view.notify(MSG_COPY_FAILED);
                    ShareOutcome::Failed
                }
            },
            None => {
                self.view.notify(MSG_COPY_FAILED);
                ShareOutcome::Failed
            }
        }
    }

    pub fn show_saved_list(&mut self) -> Result<()> {
        let mut saved = self.store.list_saved()?;
        saved.reverse();
        self.view.show_saved_list(&saved);
        self.session.saved_list_open = true;
        Ok(())
    }

    pub fn close_saved_list(&mut self) {
        self.view.hide_saved_list();
        self.session.saved_list_open = false;
    }

    /// Reopen a ticket from the catalog or the saved list. Like a draw, this
    /// replaces today's record. Returns false when the id is unknown.
    pub fn load_saved_ticket(&mut self, id: u32) -> Result<bool> {
        let ticket = match self.tickets.as_ref().and_then(|c| c.find(id)) {
            Some(ticket) => Some(ticket.clone()),
            None => self.store.find_saved(id)?.map(|saved| saved.ticket),
        };

        let Some(ticket) = ticket else {
            debug!(id, "no saved ticket to load");
            return Ok(false);
        };

        self.close_saved_list();
        self.show_ticket(ticket)?;
        Ok(true)
    }

    fn set_screen(&mut self, screen: Screen) {
        self.session.screen = screen;
        self.view.set_screen(screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breath::{BreathState, Phase};
    use crate::db::Database;
    use crate::models::SavedTicket;
    use crate::view::{Clipboard, ShareSheet};
    use anyhow::bail;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Screen(Screen),
        Ticket(u32),
        Breath(Phase),
        Timer(String),
        SavedList(Vec<u32>),
        HideSavedList,
        TodayHint(u32),
        Notify(String),
        ClearInput,
    }

    #[derive(Default)]
    struct RecordingView {
        events: Vec<Event>,
    }

    impl RecordingView {
        fn notifications(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Notify(m) => Some(m.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl View for RecordingView {
        fn set_screen(&mut self, screen: Screen) {
            self.events.push(Event::Screen(screen));
        }
        fn render_ticket(&mut self, ticket: &Ticket, _gradient: &Gradient) {
            self.events.push(Event::Ticket(ticket.id));
        }
        fn render_breath(&mut self, state: &BreathState) {
            self.events.push(Event::Breath(state.phase));
        }
        fn render_timer(&mut self, label: &str) {
            self.events.push(Event::Timer(label.to_string()));
        }
        fn show_saved_list(&mut self, items: &[SavedTicket]) {
            self.events
                .push(Event::SavedList(items.iter().map(|t| t.ticket.id).collect()));
        }
        fn hide_saved_list(&mut self) {
            self.events.push(Event::HideSavedList);
        }
        fn show_today_hint(&mut self, ticket_id: u32) {
            self.events.push(Event::TodayHint(ticket_id));
        }
        fn notify(&mut self, message: &str) {
            self.events.push(Event::Notify(message.to_string()));
        }
        fn clear_input(&mut self) {
            self.events.push(Event::ClearInput);
        }
    }

    struct FakeShare {
        fail: bool,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl ShareSheet for FakeShare {
        fn share(&mut self, payload: &SharePayload) -> Result<()> {
            self.calls.borrow_mut().push(format!("share:{}", payload.text));
            if self.fail {
                bail!("share dismissed");
            }
            Ok(())
        }
    }

    struct FakeClipboard {
        fail: bool,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            self.calls.borrow_mut().push(format!("copy:{}", text));
            if self.fail {
                bail!("clipboard unavailable");
            }
            Ok(())
        }
    }

    fn setup_app_with(
        catalogs: Catalogs,
        platform: Platform,
    ) -> (App<RecordingView>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let store = SessionStore::new(Database::open(&db_path).unwrap());
        let app = App::new(store, catalogs, platform, RecordingView::default());
        (app, dir)
    }

    fn setup_app() -> (App<RecordingView>, tempfile::TempDir) {
        setup_app_with(Catalogs::embedded(), Platform::none())
    }

    fn platform(
        share: Option<bool>,
        clipboard: Option<bool>,
    ) -> (Platform, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let platform = Platform {
            share: share.map(|fail| {
                Box::new(FakeShare {
                    fail,
                    calls: Rc::clone(&calls),
                }) as Box<dyn ShareSheet>
            }),
            clipboard: clipboard.map(|fail| {
                Box::new(FakeClipboard {
                    fail,
                    calls: Rc::clone(&calls),
                }) as Box<dyn Clipboard>
            }),
        };
        (platform, calls)
    }

    // ==================== Draw ====================

    #[test]
    fn test_parse_ticket_number() {
        assert_eq!(parse_ticket_number("7"), Some(7));
        assert_eq!(parse_ticket_number("  500 "), Some(500));
        assert_eq!(parse_ticket_number("0"), None);
        assert_eq!(parse_ticket_number("501"), None);
        assert_eq!(parse_ticket_number("-3"), None);
        assert_eq!(parse_ticket_number("3.5"), None);
        assert_eq!(parse_ticket_number("abc"), None);
        assert_eq!(parse_ticket_number(""), None);
    }

    #[test]
    fn test_draw_catalog_ticket() {
        let (mut app, _dir) = setup_app();
        app.draw("7").unwrap();

        let current = app.session().current().unwrap();
        assert_eq!(current.title, "一步一步");
        assert_eq!(app.session().screen(), Screen::Result);
        assert!(app.view().events.contains(&Event::Ticket(7)));
    }

    #[test]
    fn test_draw_records_today() {
        let (mut app, _dir) = setup_app();
        app.draw("42").unwrap();

        let record = app.store().drawn_today().unwrap().unwrap();
        assert_eq!(record.ticket.id, 42);
    }

    #[test]
    fn test_draw_999_is_rejected() {
        let (mut app, _dir) = setup_app();
        app.draw("999").unwrap();

        assert_eq!(app.view().notifications(), vec![MSG_INVALID_NUMBER]);
        assert_eq!(app.session().screen(), Screen::Main);
        assert!(app.session().current().is_none());
        assert!(app.store().today_record().unwrap().is_none());
    }

    #[test]
    fn test_draw_without_catalog_notifies() {
        let catalogs = Catalogs {
            tickets: None,
            patterns: BreathTable::embedded().ok(),
            load_error: Some("boom".to_string()),
        };
        let (mut app, _dir) = setup_app_with(catalogs, Platform::none());
        app.draw("7").unwrap();

        assert_eq!(app.view().notifications(), vec![MSG_LOAD_FAILED]);
        assert!(app.session().current().is_none());
    }

    #[test]
    fn test_draw_random_uses_catalog() {
        let (mut app, _dir) = setup_app();
        app.draw_random().unwrap();

        let id = app.session().current().unwrap().id;
        assert!(TicketCatalog::embedded().unwrap().find(id).is_some());
        assert_eq!(app.session().screen(), Screen::Result);
    }

    #[test]
    fn test_failed_record_keeps_shown_ticket_current() {
        let (mut app, dir) = setup_app();
        app.draw("42").unwrap();

        let other = rusqlite::Connection::open(dir.path().join("test.db")).unwrap();
        other.execute_batch("DROP TABLE storage").unwrap();

        assert!(app.draw("7").is_err());
        assert_eq!(app.session().screen(), Screen::Result);
        assert_eq!(app.session().current().unwrap().id, 7);
        assert_eq!(app.view().events.last(), Some(&Event::Screen(Screen::Result)));
        assert!(app.view().events.contains(&Event::Ticket(7)));
    }

    #[test]
    fn test_back_to_main_clears_input() {
        let (mut app, _dir) = setup_app();
        app.draw("7").unwrap();
        app.back_to_main();

        assert_eq!(app.session().screen(), Screen::Main);
        assert_eq!(app.view().events.last(), Some(&Event::ClearInput));
    }

    // ==================== Startup ====================

    #[test]
    fn test_start_reports_load_failure_once() {
        let catalogs = Catalogs {
            tickets: None,
            patterns: None,
            load_error: Some("missing".to_string()),
        };
        let (mut app, _dir) = setup_app_with(catalogs, Platform::none());
        app.start().unwrap();
        app.start().unwrap();

        assert_eq!(app.view().notifications(), vec![MSG_LOAD_FAILED]);
    }

    #[test]
    fn test_start_shows_today_hint() {
        let (mut app, _dir) = setup_app();
        app.draw("12").unwrap();
        app.start().unwrap();

        assert!(app.view().events.contains(&Event::TodayHint(12)));
    }

    #[test]
    fn test_start_ignores_stale_record() {
        let (mut app, _dir) = setup_app();
        app.store()
            .record_drawn_on(&Ticket::fallback(12), "Mon Jan 01 2001")
            .unwrap();
        app.start().unwrap();

        assert!(!app
            .view()
            .events
            .iter()
            .any(|e| matches!(e, Event::TodayHint(_))));
    }

    // ==================== Breath practice ====================

    #[test]
    fn test_practice_uses_ticket_pattern() {
        let (mut app, _dir) = setup_app();
        app.draw("7").unwrap();
        assert!(app.start_breath_practice());

        assert_eq!(app.session().screen(), Screen::Breath);
        assert_eq!(app.session().remaining_seconds(), Some(60));
        assert!(app.view().events.contains(&Event::Timer("1:00".to_string())));

        // focus: inhale 4, hold 2, exhale 4
        let phases: Vec<Phase> = (0..6)
            .map(|_| {
                assert!(app.animation_frame());
                match app.view().events.last() {
                    Some(Event::Breath(phase)) => *phase,
                    other => panic!("unexpected event {:?}", other),
                }
            })
            .collect();
        assert_eq!(phases[3], Phase::Inhale);
        assert_eq!(phases[4], Phase::Hold);
        assert_eq!(phases[5], Phase::Hold);
    }

    #[test]
    fn test_practice_defaults_to_gentle_without_ticket() {
        let (mut app, _dir) = setup_app();
        assert!(app.start_breath_practice());
        assert!(app.session().is_practicing());
    }

    #[test]
    fn test_missing_pattern_stays_on_result() {
        let (mut app, _dir) = setup_app();
        let mut ticket = Ticket::fallback(9);
        ticket.breath = "unknown".to_string();
        app.show_ticket(ticket).unwrap();

        assert!(!app.start_breath_practice());
        assert_eq!(app.session().screen(), Screen::Result);
        assert_eq!(app.view().notifications(), vec![MSG_BREATH_MISSING]);
    }

    #[test]
    fn test_countdown_auto_stops_after_sixty_ticks() {
        let (mut app, _dir) = setup_app();
        app.draw("7").unwrap();
        app.start_breath_practice();

        for _ in 0..59 {
            assert!(app.countdown_tick());
        }
        assert!(app.session().is_practicing());
        assert!(!app.countdown_tick());

        assert!(!app.session().is_practicing());
        assert_eq!(app.session().screen(), Screen::Result);
        assert_eq!(app.view().notifications(), vec![MSG_PRACTICE_DONE]);
        assert!(app.view().events.contains(&Event::Timer("0:00".to_string())));
    }

    #[test]
    fn test_stop_cancels_ticker_and_frames() {
        let (mut app, _dir) = setup_app();
        app.draw("7").unwrap();
        app.start_breath_practice();
        app.stop_breath_practice();

        assert!(!app.animation_frame());
        assert!(!app.countdown_tick());
        assert_eq!(app.session().remaining_seconds(), None);
        assert_eq!(app.view().notifications(), vec![MSG_PRACTICE_DONE]);
    }

    #[test]
    fn test_stop_when_idle_does_nothing() {
        let (mut app, _dir) = setup_app();
        app.draw("7").unwrap();
        app.stop_breath_practice();
        assert!(app.view().notifications().is_empty());
    }

    #[test]
    fn test_frame_outside_breath_screen_is_skipped() {
        let (mut app, _dir) = setup_app();
        app.draw("7").unwrap();
        assert!(!app.animation_frame());
    }

    // ==================== Save ====================

    #[test]
    fn test_save_twice() {
        let (mut app, _dir) = setup_app();
        app.draw("7").unwrap();
        app.save().unwrap();
        app.save().unwrap();

        assert_eq!(app.store().list_saved().unwrap().len(), 1);
        assert_eq!(
            app.view().notifications(),
            vec![MSG_SAVED, MSG_ALREADY_SAVED]
        );
    }

    #[test]
    fn test_save_without_ticket() {
        let (mut app, _dir) = setup_app();
        app.save().unwrap();
        assert!(app.store().list_saved().unwrap().is_empty());
        assert_eq!(app.view().notifications(), vec![MSG_NO_TICKET]);
    }

    // ==================== Share ====================

    #[test]
    fn test_share_text_format() {
        let ticket = Ticket::fallback(77);
        assert_eq!(
            ticket.share_text(),
            "回到呼吸\n此刻就是最好的時刻。\n\n— Ticket to Now #77"
        );
    }

    #[test]
    fn test_share_sheet_success_skips_clipboard() {
        let (platform, calls) = platform(Some(false), Some(false));
        let (mut app, _dir) = setup_app_with(Catalogs::embedded(), platform);
        app.draw("77").unwrap();

        assert_eq!(app.share(), ShareOutcome::Shared);
        assert_eq!(calls.borrow().len(), 1);
        assert!(calls.borrow()[0].starts_with("share:"));
        assert!(app.view().notifications().is_empty());
    }

    #[test]
    fn test_share_falls_back_to_clipboard() {
        let (platform, calls) = platform(Some(true), Some(false));
        let (mut app, _dir) = setup_app_with(Catalogs::embedded(), platform);
        app.draw("77").unwrap();

        assert_eq!(app.share(), ShareOutcome::Copied);
        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(app.view().notifications(), vec![MSG_COPIED]);
    }

    #[test]
    fn test_share_without_share_sheet_copies() {
        let (platform, calls) = platform(None, Some(false));
        let (mut app, _dir) = setup_app_with(Catalogs::embedded(), platform);
        app.draw("77").unwrap();

        assert_eq!(app.share(), ShareOutcome::Copied);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_share_all_tiers_fail() {
        let (platform, _calls) = platform(Some(true), Some(true));
        let (mut app, _dir) = setup_app_with(Catalogs::embedded(), platform);
        app.draw("77").unwrap();

        assert_eq!(app.share(), ShareOutcome::Failed);
        assert_eq!(app.view().notifications(), vec![MSG_COPY_FAILED]);
    }

    #[test]
    fn test_share_with_no_capabilities() {
        let (mut app, _dir) = setup_app();
        app.draw("77").unwrap();
        assert_eq!(app.share(), ShareOutcome::Failed);
    }

    // ==================== Saved list ====================

    #[test]
    fn test_saved_list_newest_first() {
        let (mut app, _dir) = setup_app();
        for n in ["7", "300", "42"] {
            app.draw(n).unwrap();
            app.save().unwrap();
        }
        app.show_saved_list().unwrap();

        assert!(app.session().saved_list_open());
        assert!(app
            .view()
            .events
            .contains(&Event::SavedList(vec![42, 300, 7])));
    }

    #[test]
    fn test_load_saved_ticket_from_saved_collection() {
        let (mut app, _dir) = setup_app();
        app.draw("300").unwrap();
        app.save().unwrap();
        app.draw("7").unwrap();
        app.show_saved_list().unwrap();

        assert!(app.load_saved_ticket(300).unwrap());
        assert!(!app.session().saved_list_open());
        assert_eq!(app.session().current().unwrap().id, 300);
        // reopening replaces today's record
        assert_eq!(app.store().drawn_today().unwrap().unwrap().ticket.id, 300);
    }

    #[test]
    fn test_load_unknown_ticket_keeps_overlay() {
        let (mut app, _dir) = setup_app();
        app.show_saved_list().unwrap();

        assert!(!app.load_saved_ticket(301).unwrap());
        assert!(app.session().saved_list_open());
    }

    // ==================== Property-Based Tests ====================

    proptest! {
        #[test]
        fn prop_uncatalogued_ids_get_fallback(id in 1u32..=500) {
            let (mut app, _dir) = setup_app_with(
                Catalogs {
                    tickets: Some(TicketCatalog::default()),
                    patterns: None,
                    load_error: None,
                },
                Platform::none(),
            );
            app.draw(&id.to_string()).unwrap();
            prop_assert_eq!(app.session().current().cloned(), Some(Ticket::fallback(id)));
        }

        #[test]
        fn prop_out_of_range_draw_changes_nothing(n in prop_oneof![i64::MIN..1i64, 501i64..i64::MAX]) {
            let (mut app, _dir) = setup_app();
            app.draw(&n.to_string()).unwrap();
            prop_assert_eq!(app.view().events.clone(), vec![Event::Notify(MSG_INVALID_NUMBER.to_string())]);
            prop_assert_eq!(app.session().screen(), Screen::Main);
        }

        #[test]
        fn prop_non_numeric_draw_changes_nothing(input in "[a-zA-Z ._-]{0,12}") {
            let (mut app, _dir) = setup_app();
            app.draw(&input).unwrap();
            prop_assert_eq!(app.view().notifications(), vec![MSG_INVALID_NUMBER]);
            prop_assert!(app.session().current().is_none());
        }
    }
}
