pub mod editor_pane;
pub mod history_pane;
pub mod keybindings;
pub mod layout;
pub mod menu_pane;
pub mod modal;
pub mod search_bar;
pub mod status_line;
pub mod styles;

use crate::app::AppState;
use crate::domain::LayoutClass;
use editor_pane::render_editor_pane;
use history_pane::render_history_pane;
use keybindings::render_keybindings;
use layout::create_layout;
use menu_pane::render_menu_pane;
use modal::render_modal;
use ratatui::Frame;
use search_bar::render_search_bar;
use status_line::render_status_line;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let mode = app.modes.mode();
    let layout_class = app.modes.layout();
    let layout = create_layout(size, layout_class, app.modes.menu_open(), mode.is_searching());

    render_keybindings(f, layout.keybindings_area, mode, app.modes.menu_open());

    if let Some(search_area) = layout.search_area {
        render_search_bar(f, app, search_area);
    }

    render_history_pane(f, app, layout.history_area);
    render_editor_pane(f, app, layout.editor_area);

    if let Some(menu_area) = layout.menu_area {
        render_menu_pane(f, app, menu_area);
    }

    render_status_line(f, app, layout.status_area);

    // Narrow layouts show modals inside the menu panel instead
    if layout_class == LayoutClass::Wide || layout.menu_area.is_none() {
        render_modal(f, app, size);
    }
}
