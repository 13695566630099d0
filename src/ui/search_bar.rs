use crate::app::AppState;
use crate::domain::FocusTarget;
use crate::ui::{
    layout::cursor_position,
    styles::{accent_color, disabled_style, focused_border_style, title_style},
};
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the search input above the history
pub fn render_search_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let accent = accent_color(app.theme, app.animation_frame);
    let term = app.modes.search_term();

    let style = if app.modes.search_enabled() {
        focused_border_style(accent)
    } else {
        disabled_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Search ", title_style(accent)))
        .style(style);

    let paragraph = Paragraph::new(term.to_string()).block(block);
    f.render_widget(paragraph, area);

    if app.focus == FocusTarget::SearchInput {
        if let Some((x, y)) = cursor_position(area, term.chars().count(), 0) {
            f.set_cursor(x, y);
        }
    }
}
