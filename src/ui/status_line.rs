use crate::app::AppState;
use crate::domain::format_countdown;
use crate::ui::styles::{error_style, hint_style, notice_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Left-hand summary: thought count, draft size and autosave countdown
fn summary(app: &AppState) -> String {
    let count = app.lifecycle.history().len();
    let chars = app.draft_text().chars().count();
    let mut text = if app.modes.mode().is_searching() {
        format!(" {} of {} thoughts match", app.visible_history().len(), count)
    } else {
        format!(" {} thoughts", count)
    };
    text.push_str(&format!(" | draft {} chars", chars));

    let has_text = app.draft().map_or(false, |d| !d.is_blank());
    if let (true, Some(ms)) = (has_text, app.time_until_autosave()) {
        text.push_str(&format!(" | autosave {}", format_countdown(ms)));
    }
    text
}

/// Render the bottom status line. Errors take precedence over notices.
pub fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![Span::styled(summary(app), hint_style())];

    if let Some(error) = &app.last_error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(error.clone(), error_style()));
    } else if let Some(notice) = &app.notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.clone(), notice_style()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::SystemClock;
    use crate::persistence::store::MemoryStore;

    #[test]
    fn test_summary_shows_countdown_only_with_text() {
        let config = Config {
            seed_welcome: false,
            ..Config::default()
        };
        let mut app = AppState::new(Box::new(MemoryStore::default()), Box::new(SystemClock), config);
        assert_eq!(summary(&app), " 0 thoughts | draft 0 chars");

        app.draft_insert_char('a');
        let text = summary(&app);
        assert!(text.starts_with(" 0 thoughts | draft 1 chars | autosave "));

        app.start_search();
        assert!(summary(&app).starts_with(" 0 of 0 thoughts match"));
    }
}
