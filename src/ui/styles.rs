use crate::domain::ThemeColor;
use ratatui::style::{Color, Modifier, Style};

/// Frames each palette color is held for when cycling
const CYCLE_FRAMES_PER_COLOR: u32 = 8;

/// Terminal color for a fixed theme choice
fn theme_to_color(theme: ThemeColor) -> Color {
    match theme {
        ThemeColor::Cyan | ThemeColor::Cycle => Color::Cyan,
        ThemeColor::Green => Color::Green,
        ThemeColor::Yellow => Color::Yellow,
        ThemeColor::Magenta => Color::Magenta,
        ThemeColor::Blue => Color::LightBlue,
        ThemeColor::Red => Color::LightRed,
    }
}

/// Accent color for this frame; `Cycle` walks the palette
pub fn accent_color(theme: ThemeColor, frame: u32) -> Color {
    match theme {
        ThemeColor::Cycle => {
            let palette = ThemeColor::palette();
            let index = (frame / CYCLE_FRAMES_PER_COLOR) as usize % palette.len();
            theme_to_color(palette[index])
        }
        fixed => theme_to_color(fixed),
    }
}

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style(accent: Color) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(accent)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style(accent: Color) -> Style {
    Style::default().fg(accent).add_modifier(Modifier::BOLD)
}

/// Border of the focused pane
pub fn focused_border_style(accent: Color) -> Style {
    Style::default().fg(accent)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border of a pane that accepts no input right now
pub fn disabled_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Timestamp label in the history list
pub fn timestamp_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Confirmation notice style
pub fn notice_style() -> Style {
    Style::default().fg(Color::Green)
}
