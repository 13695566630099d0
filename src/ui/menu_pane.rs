use crate::app::AppState;
use crate::domain::{LayoutClass, MenuAction, Mode};
use crate::ui::{
    modal::render_modal_content,
    styles::{accent_color, border_style, default_style, selected_style, title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

/// Render the menu panel. On narrow layouts an open modal is drawn
/// here instead of as an overlay.
pub fn render_menu_pane(f: &mut Frame, app: &AppState, area: Rect) {
    if app.modes.mode().is_modal() && app.modes.layout() == LayoutClass::Narrow {
        f.render_widget(Clear, area);
        render_modal_content(f, app, area);
        return;
    }

    let accent = accent_color(app.theme, app.animation_frame);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Menu ", title_style(accent)))
        .style(border_style());

    let items: Vec<ListItem> = MenuAction::all()
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let active = matches!(
                (action, app.modes.mode()),
                (MenuAction::Search, Mode::Searching { .. })
            );
            let label = if active {
                format!(" {} *", action.label())
            } else {
                format!(" {}", action.label())
            };
            let style = if i == app.menu_cursor {
                selected_style(accent)
            } else {
                default_style()
            };
            ListItem::new(Line::styled(label, style))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
