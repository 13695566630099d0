use crate::app::AppState;
use crate::domain::Mode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        return true;
    }

    let mode = app.modes.mode().clone();
    match mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Searching { .. } => handle_search_mode(app, key),
        Mode::ShowingAbout => handle_about_mode(app, key),
        Mode::ConfirmingPurge => handle_purge_mode(app, key),
        Mode::PickingColor => handle_color_mode(app, key),
    }
    false
}

/// Shortcuts shared by normal and search mode. Returns true if consumed.
fn handle_shortcut(app: &mut AppState, key: KeyEvent) -> bool {
    if key.code == KeyCode::F(1) {
        app.open_about();
        return true;
    }
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key.code {
        KeyCode::Char('f') => app.start_search(),
        KeyCode::Char('o') => app.toggle_menu(),
        KeyCode::Char('k') => app.open_color_picker(),
        KeyCode::Char('p') => app.open_purge_confirm(),
        _ => return false,
    }
    true
}

/// Handle keys in normal mode: typing goes to the draft
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) {
    if handle_shortcut(app, key) {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Menu navigation takes the arrow keys, Enter and Esc while open
    if app.modes.menu_open() {
        match key.code {
            KeyCode::Up => return app.menu_up(),
            KeyCode::Down => return app.menu_down(),
            KeyCode::Enter => return app.activate_menu(),
            KeyCode::Esc => return app.close_menu(),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Char('s') if ctrl => app.save_and_start_new(),
        KeyCode::Char('n') if ctrl => app.new_thought(),
        KeyCode::Char(c) if !ctrl => app.draft_insert_char(c),
        KeyCode::Enter => app.draft_insert_char('\n'),
        KeyCode::Backspace => app.draft_backspace(),
        KeyCode::Up | KeyCode::PageUp => app.scroll_history_up(),
        KeyCode::Down | KeyCode::PageDown => app.scroll_history_down(),
        _ => {}
    }
}

/// Handle keys while the search bar has focus
fn handle_search_mode(app: &mut AppState, key: KeyEvent) {
    if handle_shortcut(app, key) {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.exit_search(),
        KeyCode::Char(c) if !ctrl => app.search_insert_char(c),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Up | KeyCode::PageUp => app.scroll_history_up(),
        KeyCode::Down | KeyCode::PageDown => app.scroll_history_down(),
        _ => {}
    }
}

fn handle_about_mode(app: &mut AppState, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
        app.dismiss();
    }
}

/// Purge needs an explicit 'y'; everything else that answers cancels
fn handle_purge_mode(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_purge(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => app.dismiss(),
        _ => {}
    }
}

fn handle_color_mode(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.color_cursor_up(),
        KeyCode::Down => app.color_cursor_down(),
        KeyCode::Enter => app.confirm_color(),
        KeyCode::Esc => app.dismiss(),
        _ => {}
    }
}
