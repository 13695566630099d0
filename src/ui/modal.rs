use crate::app::{AppState, WELCOME_TEXT};
use crate::domain::{FocusTarget, Mode, NewDraftPolicy, ThemeColor};
use crate::ui::{
    layout::create_modal_area,
    styles::{accent_color, default_style, modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the active modal as a centered overlay
pub fn render_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if !app.modes.mode().is_modal() {
        return;
    }
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);
    render_modal_content(f, app, modal_area);
}

/// Draw the active modal's body into `area`
pub fn render_modal_content(f: &mut Frame, app: &AppState, area: Rect) {
    let (title, lines) = match app.modes.mode() {
        Mode::ShowingAbout => (" About ", about_lines(app)),
        Mode::ConfirmingPurge => (" Purge history ", purge_lines(app)),
        Mode::PickingColor => (" Theme color ", color_lines(app)),
        Mode::Normal | Mode::Searching { .. } => return,
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

/// Style for a button, highlighted when it holds focus
fn button_style(app: &AppState, target: FocusTarget) -> Style {
    if app.focus == target {
        selected_style(accent_color(app.theme, app.animation_frame))
    } else {
        modal_title_style()
    }
}

fn about_lines(app: &AppState) -> Vec<Line<'static>> {
    let minutes = app.config.stale_threshold_secs / 60;
    let new_draft = match app.lifecycle.policy() {
        NewDraftPolicy::KeepExisting => "  Ctrl+N keeps unsaved text in the editor.",
        NewDraftPolicy::DiscardExisting => "  Ctrl+N discards unsaved text.",
    };
    vec![
        Line::raw(""),
        Line::raw(format!("  thoughts {}", env!("CARGO_PKG_VERSION"))),
        Line::raw(""),
        Line::raw(format!("  {}", WELCOME_TEXT)),
        Line::raw(format!("  Idle drafts are saved after {} minutes.", minutes)),
        Line::raw(new_draft),
        Line::raw("  Ctrl+F search, Ctrl+O menu, Ctrl+K color, Ctrl+P purge."),
        Line::raw(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[Esc] Close", button_style(app, FocusTarget::AboutClose)),
        ]),
    ]
}

fn purge_lines(app: &AppState) -> Vec<Line<'static>> {
    let count = app.lifecycle.history().len();
    vec![
        Line::raw(""),
        Line::raw(format!("  Delete all {} saved thoughts?", count)),
        Line::raw("  This cannot be undone. Your current draft is discarded too."),
        Line::raw(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[y] Purge", modal_title_style()),
            Span::raw("   "),
            Span::styled("[n] Cancel", button_style(app, FocusTarget::PurgeCancel)),
        ]),
    ]
}

fn color_lines(app: &AppState) -> Vec<Line<'static>> {
    let accent = accent_color(app.theme, app.animation_frame);
    let mut lines = vec![Line::raw("")];

    for (i, color) in ThemeColor::all().iter().enumerate() {
        let marker = if *color == app.theme { "*" } else { " " };
        let label = format!("  {} {}", marker, color.name());
        let style = if i == app.color_cursor {
            selected_style(accent)
        } else {
            default_style()
        };
        lines.push(Line::styled(label, style));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("[Enter] Apply", modal_title_style()),
        Span::raw("   "),
        Span::styled("[Esc] Close", button_style(app, FocusTarget::ColorPickerClose)),
    ]));
    lines
}
