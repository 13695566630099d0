use crate::app::AppState;
use crate::domain::{format_age, format_timestamp};
use crate::ui::styles::{
    accent_color, border_style, default_style, hint_style, timestamp_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the committed thoughts, newest first
pub fn render_history_pane(f: &mut Frame, app: &AppState, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let accent = accent_color(app.theme, app.animation_frame);
    let entries = app.visible_history();
    let total = app.lifecycle.history().len();

    let title = if app.modes.mode().is_searching() {
        format!(" Thoughts ({} of {} match) ", entries.len(), total)
    } else {
        format!(" Thoughts ({}) ", total)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, title_style(accent)))
        .style(border_style());

    let now = app.now();
    let items: Vec<ListItem> = if entries.is_empty() {
        let message = if app.modes.mode().is_searching() {
            "  No thoughts match your search"
        } else {
            "  Nothing saved yet"
        };
        vec![ListItem::new(Line::styled(message, hint_style()))]
    } else {
        entries
            .iter()
            .skip(app.history_scroll)
            .map(|entry| {
                let mut lines = vec![Line::from(vec![
                    Span::styled(format_timestamp(entry.created_at), timestamp_style()),
                    Span::styled(format!("  ({})", format_age(entry.created_at, now)), hint_style()),
                ])];
                lines.extend(
                    entry
                        .text()
                        .lines()
                        .map(|line| Line::styled(format!("  {}", line), default_style())),
                );
                lines.push(Line::raw(""));
                ListItem::new(lines)
            })
            .collect()
    };

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}
