use crate::app::AppState;
use crate::domain::{format_countdown, FocusTarget};
use crate::ui::{
    layout::cursor_position,
    styles::{accent_color, disabled_style, focused_border_style, title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the draft editor
pub fn render_editor_pane(f: &mut Frame, app: &AppState, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let enabled = app.modes.editor_enabled();
    let is_focused = enabled && app.focus == FocusTarget::DraftEditor;
    let accent = accent_color(app.theme, app.animation_frame);

    let title = match app.time_until_autosave() {
        Some(ms) if !app.draft().map_or(true, |d| d.is_blank()) => {
            format!(" New thought - autosave in {} ", format_countdown(ms))
        }
        _ => String::from(" New thought "),
    };

    let (border, title_span) = if enabled {
        (focused_border_style(accent), Span::styled(title, title_style(accent)))
    } else {
        (disabled_style(), Span::styled(title, disabled_style()))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title_span)
        .style(border);

    let text = app.draft_text();
    let lines: Vec<Line> = text.split('\n').map(|line| Line::raw(line.to_string())).collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);

    // Cursor sits after the last character
    if is_focused {
        let line_number = text.matches('\n').count();
        let column = text.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0);

        if let Some((x, y)) = cursor_position(area, column, line_number) {
            f.set_cursor(x, y);
        }
    }
}
