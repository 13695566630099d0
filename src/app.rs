use crate::config::Config;
use crate::domain::{
    filter_history, Clock, CommitOutcome, Draft, FocusSink, FocusTarget, History, LayoutClass, Lifecycle, MenuAction,
    Mode, ModeController, ThemeColor, Thought, Timestamp, TimestampedThought,
};
use crate::persistence::HistoryStore;
use crate::ticker::Probe;
use std::time::Instant;
use tracing::{info, warn};

pub const WELCOME_TEXT: &str =
    "Welcome! Type a thought below. Ctrl+S saves it; after five idle minutes it is saved for you.";

/// Main application state. Owns the lifecycle, the mode controller and
/// the persistence collaborator; every event goes through here.
pub struct AppState {
    pub lifecycle: Lifecycle,
    pub modes: ModeController,
    pub config: Config,
    pub focus: FocusTarget,
    pub theme: ThemeColor,
    pub color_cursor: usize,
    pub menu_cursor: usize,
    pub history_scroll: usize,
    /// Animation frame counter for the cycling theme (increments every tick)
    pub animation_frame: u32,
    /// Last persistence failure, shown in the status line
    pub last_error: Option<String>,
    /// Short-lived confirmation like "Saved"
    pub notice: Option<String>,
    store: Box<dyn HistoryStore>,
    clock: Box<dyn Clock>,
    probe: Probe,
}

impl AppState {
    pub fn new(store: Box<dyn HistoryStore>, clock: Box<dyn Clock>, config: Config) -> Self {
        let now = clock.now_millis();
        let mut last_error = None;

        let mut history = match store.load() {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, store = %store.describe(), "could not load history, starting empty");
                last_error = Some(format!("Load failed: {}", e));
                History::new()
            }
        };

        if history.is_empty() && config.seed_welcome {
            if let Some(welcome) = Thought::new(WELCOME_TEXT) {
                history = History::from_newest_first(vec![TimestampedThought::new(welcome, now)]);
            }
        }

        let theme = store.load_color().unwrap_or_else(|e| {
            warn!(error = %e, "could not load theme color");
            ThemeColor::default()
        });

        let mut lifecycle = Lifecycle::new(
            history,
            config.stale_threshold_ms(),
            config.new_draft_policy,
            now,
        );
        lifecycle.begin_draft(now);

        info!(
            store = %store.describe(),
            thoughts = lifecycle.history().len(),
            "app started"
        );

        Self {
            lifecycle,
            modes: ModeController::new(LayoutClass::Wide),
            probe: Probe::new(config.probe_interval(), Instant::now()),
            config,
            focus: FocusTarget::DraftEditor,
            theme,
            color_cursor: 0,
            menu_cursor: 0,
            history_scroll: 0,
            animation_frame: 0,
            last_error,
            notice: None,
            store,
            clock,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now_millis()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.lifecycle.draft()
    }

    pub fn draft_text(&self) -> &str {
        self.lifecycle.draft().map(|d| d.text.as_str()).unwrap_or("")
    }

    /// History entries matching the current search term
    pub fn visible_history(&self) -> Vec<&TimestampedThought> {
        filter_history(self.lifecycle.history().as_slice(), self.modes.search_term())
    }

    /// Milliseconds until the open draft is autosaved
    pub fn time_until_autosave(&self) -> Option<i64> {
        self.lifecycle.time_until_stale(self.now())
    }

    fn edit_draft_with(&mut self, edit: impl FnOnce(&mut String)) {
        if !self.modes.editor_enabled() {
            return;
        }
        let mut text = self.draft_text().to_string();
        edit(&mut text);
        let now = self.now();
        self.lifecycle.edit_draft(now, text);
        self.notice = None;
    }

    pub fn draft_insert_char(&mut self, c: char) {
        self.edit_draft_with(|text| text.push(c));
    }

    pub fn draft_backspace(&mut self) {
        self.edit_draft_with(|text| {
            text.pop();
        });
    }

    /// Ask for a new draft; keeps or discards an open one per config
    pub fn new_thought(&mut self) {
        if !self.modes.editor_enabled() {
            return;
        }
        let now = self.now();
        self.lifecycle.begin_draft(now);
        self.focus(FocusTarget::DraftEditor);
    }

    /// Commit the draft and open a fresh one
    pub fn save_and_start_new(&mut self) {
        if !self.modes.editor_enabled() {
            return;
        }
        let now = self.now();
        let outcome = self.lifecycle.save_and_start_new(now);
        self.handle_commit(outcome);
    }

    /// Commit whatever is in the draft (used on exit)
    pub fn commit_draft(&mut self) {
        let now = self.now();
        let outcome = self.lifecycle.commit(now);
        self.handle_commit(outcome);
    }

    /// Persist a commit that changed history. Failures are logged and
    /// surfaced through `last_error`; in-memory history is kept as is.
    fn handle_commit(&mut self, outcome: CommitOutcome) {
        let CommitOutcome::Committed(entry) = outcome else {
            return;
        };
        self.history_scroll = 0;
        match self.store.record_commit(self.lifecycle.history(), &entry) {
            Ok(()) => {
                self.last_error = None;
                self.notice = Some(String::from("Saved"));
            }
            Err(e) => {
                warn!(error = %e, store = %self.store.describe(), "failed to persist history");
                self.last_error = Some(format!("Save failed: {}", e));
            }
        }
    }

    /// Called every loop iteration; runs the staleness check when the probe is due
    pub fn tick(&mut self, instant: Instant) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.probe.due(instant) {
            self.check_autosave();
        }
    }

    /// Commit the draft if it has been idle past the threshold
    pub fn check_autosave(&mut self) {
        let now = self.now();
        if let Some(outcome) = self.lifecycle.tick(now) {
            if outcome.changed_history() {
                info!("idle draft autosaved");
            }
            self.handle_commit(outcome);
        }
    }

    pub fn resize(&mut self, width: u16) {
        let layout = LayoutClass::for_width(width, self.config.narrow_width);
        self.modes.set_layout(layout);
    }

    // Mode transitions

    pub fn start_search(&mut self) {
        let focus = self.modes.request_search();
        self.apply_focus(focus);
        self.history_scroll = 0;
    }

    pub fn search_insert_char(&mut self, c: char) {
        let mut term = self.modes.search_term().to_string();
        term.push(c);
        if self.modes.update_search_term(term) {
            self.history_scroll = 0;
        }
    }

    pub fn search_backspace(&mut self) {
        let mut term = self.modes.search_term().to_string();
        term.pop();
        self.modes.update_search_term(term);
    }

    pub fn exit_search(&mut self) {
        let focus = self.modes.exit_search();
        self.apply_focus(focus);
    }

    pub fn open_about(&mut self) {
        let focus = self.modes.request_about();
        self.apply_focus(focus);
    }

    pub fn open_purge_confirm(&mut self) {
        let focus = self.modes.request_purge_confirm();
        self.apply_focus(focus);
    }

    pub fn open_color_picker(&mut self) {
        self.color_cursor = ThemeColor::all()
            .iter()
            .position(|c| *c == self.theme)
            .unwrap_or(0);
        let focus = self.modes.request_color_picker();
        self.apply_focus(focus);
    }

    pub fn dismiss(&mut self) {
        let focus = self.modes.dismiss();
        self.apply_focus(focus);
    }

    /// Purge history. Only acts while the confirmation is showing.
    pub fn confirm_purge(&mut self) {
        if *self.modes.mode() != Mode::ConfirmingPurge {
            return;
        }
        let now = self.now();
        self.lifecycle.purge(now);
        self.history_scroll = 0;
        match self.store.purge() {
            Ok(()) => {
                self.last_error = None;
                self.notice = Some(String::from("History purged"));
            }
            Err(e) => {
                warn!(error = %e, "failed to purge stored history");
                self.last_error = Some(format!("Purge failed: {}", e));
            }
        }
        self.dismiss();
    }

    pub fn color_cursor_up(&mut self) {
        self.color_cursor = self.color_cursor.saturating_sub(1);
    }

    pub fn color_cursor_down(&mut self) {
        if self.color_cursor + 1 < ThemeColor::all().len() {
            self.color_cursor += 1;
        }
    }

    /// Apply the highlighted color and close the picker
    pub fn confirm_color(&mut self) {
        if *self.modes.mode() != Mode::PickingColor {
            return;
        }
        if let Some(color) = ThemeColor::all().get(self.color_cursor).copied() {
            self.theme = color;
            if let Err(e) = self.store.save_color(color) {
                warn!(error = %e, "failed to save theme color");
                self.last_error = Some(format!("Color not saved: {}", e));
            }
        }
        self.dismiss();
    }

    pub fn toggle_menu(&mut self) {
        if self.modes.toggle_menu() {
            self.menu_cursor = 0;
        }
    }

    pub fn close_menu(&mut self) {
        self.modes.close_menu();
    }

    pub fn menu_up(&mut self) {
        self.menu_cursor = self.menu_cursor.saturating_sub(1);
    }

    pub fn menu_down(&mut self) {
        if self.menu_cursor + 1 < MenuAction::all().len() {
            self.menu_cursor += 1;
        }
    }

    /// Run the highlighted menu entry
    pub fn activate_menu(&mut self) {
        let Some(action) = MenuAction::all().get(self.menu_cursor).copied() else {
            return;
        };
        self.run_menu_action(action);
    }

    pub fn run_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::Search => self.start_search(),
            MenuAction::About => self.open_about(),
            MenuAction::Color => self.open_color_picker(),
            MenuAction::Purge => self.open_purge_confirm(),
        }
    }

    pub fn scroll_history_up(&mut self) {
        self.history_scroll = self.history_scroll.saturating_sub(1);
    }

    pub fn scroll_history_down(&mut self) {
        if self.history_scroll + 1 < self.visible_history().len() {
            self.history_scroll += 1;
        }
    }

    fn apply_focus(&mut self, focus: Option<FocusTarget>) {
        if let Some(target) = focus {
            self.focus(target);
        }
    }
}

impl FocusSink for AppState {
    fn focus(&mut self, target: FocusTarget) {
        self.focus = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct ManualClock(Rc<Cell<i64>>);

    impl ManualClock {
        fn set(&self, ms: i64) {
            self.0.set(ms);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> Timestamp {
            self.0.get()
        }
    }

    fn quiet_config() -> Config {
        Config {
            seed_welcome: false,
            ..Config::default()
        }
    }

    fn create_test_app() -> (AppState, Rc<MemoryStore>, ManualClock) {
        let store = Rc::new(MemoryStore::default());
        let clock = ManualClock::default();
        let app = AppState::new(Box::new(store.clone()), Box::new(clock.clone()), quiet_config());
        (app, store, clock)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.draft_insert_char(c);
        }
    }

    fn history_texts(app: &AppState) -> Vec<String> {
        app.lifecycle.history().iter().map(|e| e.text().to_string()).collect()
    }

    #[test]
    fn test_app_state_new() {
        let (app, _, _) = create_test_app();
        assert_eq!(app.draft(), Some(&Draft::empty(0)));
        assert!(app.lifecycle.history().is_empty());
        assert_eq!(*app.modes.mode(), Mode::Normal);
        assert_eq!(app.focus, FocusTarget::DraftEditor);
    }

    #[test]
    fn test_welcome_seeded_only_when_empty() {
        let clock = ManualClock::default();
        clock.set(42);
        let app = AppState::new(Box::new(MemoryStore::default()), Box::new(clock.clone()), Config::default());
        assert_eq!(app.lifecycle.history().len(), 1);
        assert_eq!(app.lifecycle.history().newest().unwrap().created_at, 42);

        let prior = History::from_newest_first(vec![TimestampedThought::new(Thought::new("old").unwrap(), 1)]);
        let app = AppState::new(Box::new(MemoryStore::with_history(prior)), Box::new(clock), Config::default());
        assert_eq!(history_texts(&app), vec!["old"]);
    }

    #[test]
    fn test_malformed_load_starts_empty_with_error() {
        let store = MemoryStore {
            malformed: true,
            ..MemoryStore::default()
        };
        let app = AppState::new(Box::new(store), Box::new(ManualClock::default()), quiet_config());
        assert!(app.lifecycle.history().is_empty());
        assert!(app.last_error.is_some());
    }

    #[test]
    fn test_save_writes_through() {
        let (mut app, store, clock) = create_test_app();
        type_text(&mut app, "  first  ");
        clock.set(1_000);
        app.save_and_start_new();

        assert_eq!(history_texts(&app), vec!["first"]);
        assert_eq!(store.writes.get(), 1);
        assert_eq!(store.history.borrow().len(), 1);
        assert_eq!(app.draft(), Some(&Draft::empty(1_000)));
        assert_eq!(app.notice.as_deref(), Some("Saved"));
    }

    #[test]
    fn test_blank_save_does_not_write() {
        let (mut app, store, _) = create_test_app();
        type_text(&mut app, "   ");
        app.save_and_start_new();
        app.save_and_start_new();

        assert!(app.lifecycle.history().is_empty());
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn test_failed_write_is_observable_but_history_kept() {
        let (mut app, store, _) = create_test_app();
        store.fail_writes.set(true);
        type_text(&mut app, "precious");
        app.save_and_start_new();

        assert_eq!(history_texts(&app), vec!["precious"]);
        assert!(app.last_error.as_deref().unwrap().contains("disk full"));

        store.fail_writes.set(false);
        type_text(&mut app, "next");
        app.save_and_start_new();
        assert!(app.last_error.is_none());
        assert_eq!(store.history.borrow().len(), 2);
    }

    #[test]
    fn test_autosave_after_idle() {
        let (mut app, store, clock) = create_test_app();
        type_text(&mut app, "idle thought");

        clock.set(299_999);
        app.check_autosave();
        assert!(app.lifecycle.history().is_empty());

        clock.set(300_001);
        app.check_autosave();
        assert_eq!(history_texts(&app), vec!["idle thought"]);
        assert_eq!(app.lifecycle.history().newest().unwrap().created_at, 0);
        assert_eq!(store.writes.get(), 1);
    }

    #[test]
    fn test_tick_only_probes_when_due() {
        let (mut app, _, clock) = create_test_app();
        type_text(&mut app, "waiting");
        clock.set(400_000);

        let start = Instant::now();
        app.tick(start);
        assert!(app.lifecycle.history().is_empty());

        app.tick(start + std::time::Duration::from_secs(16));
        assert_eq!(app.lifecycle.history().len(), 1);
        assert_eq!(app.animation_frame, 2);
    }

    #[test]
    fn test_new_thought_keeps_unsaved_text() {
        let (mut app, _, _) = create_test_app();
        type_text(&mut app, "unsaved");
        app.new_thought();
        assert_eq!(app.draft_text(), "unsaved");
    }

    #[test]
    fn test_editor_gated_while_modal() {
        let (mut app, _, _) = create_test_app();
        type_text(&mut app, "ab");
        app.open_about();
        assert_eq!(app.focus, FocusTarget::AboutClose);

        type_text(&mut app, "cd");
        app.draft_backspace();
        app.save_and_start_new();
        assert_eq!(app.draft_text(), "ab");
        assert!(app.lifecycle.history().is_empty());

        app.dismiss();
        assert_eq!(app.focus, FocusTarget::DraftEditor);
        app.draft_backspace();
        assert_eq!(app.draft_text(), "a");
    }

    #[test]
    fn test_search_filters_visible_history() {
        let (mut app, _, _) = create_test_app();
        for text in ["Rust notes", "groceries", "more rust"] {
            type_text(&mut app, text);
            app.save_and_start_new();
        }

        app.start_search();
        assert_eq!(app.focus, FocusTarget::SearchInput);
        for c in "RUST".chars() {
            app.search_insert_char(c);
        }
        let visible: Vec<&str> = app.visible_history().iter().map(|e| e.text()).collect();
        assert_eq!(visible, vec!["more rust", "Rust notes"]);

        app.exit_search();
        assert_eq!(app.visible_history().len(), 3);
        assert_eq!(app.focus, FocusTarget::DraftEditor);
    }

    #[test]
    fn test_purge_requires_confirmation() {
        let (mut app, store, clock) = create_test_app();
        type_text(&mut app, "keep me?");
        app.save_and_start_new();

        app.confirm_purge();
        assert_eq!(app.lifecycle.history().len(), 1);

        app.open_purge_confirm();
        type_text(&mut app, "ignored");
        clock.set(5_000);
        app.confirm_purge();

        assert!(app.lifecycle.history().is_empty());
        assert_eq!(app.draft(), Some(&Draft::empty(5_000)));
        assert_eq!(store.purges.get(), 1);
        assert_eq!(*app.modes.mode(), Mode::Normal);
    }

    #[test]
    fn test_cancel_purge_leaves_history() {
        let (mut app, store, _) = create_test_app();
        type_text(&mut app, "safe");
        app.save_and_start_new();

        app.open_purge_confirm();
        app.dismiss();
        assert_eq!(app.lifecycle.history().len(), 1);
        assert_eq!(store.purges.get(), 0);
    }

    #[test]
    fn test_color_picker_saves_choice() {
        let (mut app, store, _) = create_test_app();
        app.open_color_picker();
        assert_eq!(app.color_cursor, 0);
        app.color_cursor_down();
        app.color_cursor_down();
        app.confirm_color();

        assert_eq!(app.theme, ThemeColor::Yellow);
        assert_eq!(store.color.get(), ThemeColor::Yellow);
        assert_eq!(*app.modes.mode(), Mode::Normal);
    }

    #[test]
    fn test_menu_actions_and_narrow_layout() {
        let (mut app, _, _) = create_test_app();
        app.resize(60);
        app.toggle_menu();
        assert!(app.modes.menu_open());

        app.menu_down();
        app.activate_menu();
        assert_eq!(*app.modes.mode(), Mode::ShowingAbout);
        assert!(app.modes.menu_open());

        app.toggle_menu();
        assert!(app.modes.menu_open());

        app.dismiss();
        app.run_menu_action(MenuAction::Search);
        assert!(app.modes.mode().is_searching());
        assert!(!app.modes.menu_open());
    }

    #[test]
    fn test_welcome_entry_persistence_per_store() {
        use crate::persistence::{DocumentStore, LocalStore};
        let temp_dir = tempfile::tempdir().unwrap();

        let mut app = AppState::new(
            Box::new(LocalStore::new(temp_dir.path())),
            Box::new(ManualClock::default()),
            Config::default(),
        );
        type_text(&mut app, "local");
        app.save_and_start_new();
        let stored = LocalStore::new(temp_dir.path()).load().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored.newest().unwrap().text(), "local");

        let mut app = AppState::new(
            Box::new(DocumentStore::new(temp_dir.path(), "erin").unwrap()),
            Box::new(ManualClock::default()),
            Config::default(),
        );
        assert_eq!(app.lifecycle.history().len(), 1);
        type_text(&mut app, "remote");
        app.save_and_start_new();
        assert_eq!(app.lifecycle.history().len(), 2);

        let stored = DocumentStore::new(temp_dir.path(), "erin").unwrap().load().unwrap();
        let texts: Vec<&str> = stored.iter().map(|e| e.text()).collect();
        assert_eq!(texts, vec!["remote"]);
    }

    #[test]
    fn test_commit_draft_on_exit() {
        let (mut app, store, _) = create_test_app();
        type_text(&mut app, "last words");
        app.commit_draft();
        assert_eq!(history_texts(&app), vec!["last words"]);
        assert_eq!(store.writes.get(), 1);
    }
}
