use crate::domain::Mode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the keys that do something in `mode`
fn hints_for(mode: &Mode, menu_open: bool) -> &'static [&'static str] {
    match mode {
        Mode::Normal if menu_open => &["↑/↓ select   ", "Enter open   ", "Esc close menu   ", "Ctrl+Q quit"],
        Mode::Normal => &[
            "Ctrl+S save   ",
            "Ctrl+N new   ",
            "Ctrl+F search   ",
            "Ctrl+O menu   ",
            "Ctrl+K color   ",
            "Ctrl+P purge   ",
            "F1 about   ",
            "Ctrl+Q quit",
        ],
        Mode::Searching { .. } => &["type to filter   ", "↑/↓ scroll   ", "Esc/Enter done   ", "Ctrl+Q quit"],
        Mode::ShowingAbout => &["Esc close"],
        Mode::ConfirmingPurge => &["y purge   ", "n/Esc cancel"],
        Mode::PickingColor => &["↑/↓ choose   ", "Enter apply   ", "Esc close"],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, mode: &Mode, menu_open: bool) {
    let mut spans = vec![Span::raw(" ")];
    spans.extend(hints_for(mode, menu_open).iter().map(|hint| Span::raw(*hint)));

    let paragraph = Paragraph::new(Line::from(spans)).style(hint_style());
    f.render_widget(paragraph, area);
}
