use crate::domain::LayoutClass;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the menu panel on wide layouts
const MENU_WIDTH: u16 = 24;

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub search_area: Option<Rect>,
    pub menu_area: Option<Rect>,
    /// Zero-sized when the narrow menu covers the content
    pub history_area: Rect,
    pub editor_area: Rect,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Search bar (3 rows) while searching
/// - Content: history above the draft editor
///   - Wide: menu panel on the left when open
///   - Narrow: an open menu takes the whole content area
/// - Bottom bar: status line (1 row)
pub fn create_layout(area: Rect, layout: LayoutClass, menu_open: bool, searching: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let keybindings_area = main_chunks[0];
    let status_area = main_chunks[2];

    let (search_area, body) = if searching {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(main_chunks[1]);
        (Some(chunks[0]), chunks[1])
    } else {
        (None, main_chunks[1])
    };

    let (menu_area, content) = match (layout, menu_open) {
        (_, false) => (None, Some(body)),
        (LayoutClass::Narrow, true) => (Some(body), None),
        (LayoutClass::Wide, true) => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
                .split(body);
            (Some(chunks[0]), Some(chunks[1]))
        }
    };

    let (history_area, editor_area) = match content {
        Some(content) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Percentage(60), // History
                    Constraint::Percentage(40), // Draft editor
                ])
                .split(content);
            (chunks[0], chunks[1])
        }
        None => (Rect::default(), Rect::default()),
    };

    MainLayout {
        keybindings_area,
        search_area,
        menu_area,
        history_area,
        editor_area,
        status_area,
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(14),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

/// Cell for a text cursor at `column`/`row` inside a bordered `area`.
/// None when it would fall on or past the border.
pub fn cursor_position(area: Rect, column: usize, row: usize) -> Option<(u16, u16)> {
    let x = area.x.saturating_add(1).checked_add(u16::try_from(column).ok()?)?;
    let y = area.y.saturating_add(1).checked_add(u16::try_from(row).ok()?)?;
    let right = area.x.saturating_add(area.width).saturating_sub(1);
    let bottom = area.y.saturating_add(area.height).saturating_sub(1);
    (x < right && y < bottom).then_some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout_plain() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = create_layout(area, LayoutClass::Wide, false, false);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert!(layout.search_area.is_none());
        assert!(layout.menu_area.is_none());
        assert!(layout.history_area.height > layout.editor_area.height);
        assert_eq!(layout.history_area.width, 100);
    }

    #[test]
    fn test_wide_menu_sits_beside_content() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = create_layout(area, LayoutClass::Wide, true, true);

        let menu = layout.menu_area.unwrap();
        assert_eq!(menu.width, MENU_WIDTH);
        assert_eq!(layout.search_area.unwrap().height, 3);
        assert_eq!(layout.history_area.width, 100 - MENU_WIDTH);
    }

    #[test]
    fn test_narrow_menu_covers_content() {
        let area = Rect::new(0, 0, 60, 30);
        let layout = create_layout(area, LayoutClass::Narrow, true, false);

        assert_eq!(layout.menu_area.unwrap().width, 60);
        assert_eq!(layout.history_area, Rect::default());
        assert_eq!(layout.editor_area, Rect::default());
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 14);
    }

    #[test]
    fn test_cursor_position_inside_border() {
        let area = Rect::new(2, 2, 60, 10);
        assert_eq!(cursor_position(area, 0, 0), Some((3, 3)));
        assert_eq!(cursor_position(area, 57, 7), Some((60, 10)));
        assert_eq!(cursor_position(area, 58, 0), None);
        assert_eq!(cursor_position(area, 0, 8), None);
    }

    #[test]
    fn test_cursor_position_huge_offsets() {
        let area = Rect::new(2, 2, 60, 10);
        assert_eq!(cursor_position(area, 65_534, 0), None);
        assert_eq!(cursor_position(area, 0, 70_000), None);
        assert_eq!(cursor_position(area, usize::MAX, usize::MAX), None);
    }
}
