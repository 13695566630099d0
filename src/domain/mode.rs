use tracing::debug;

/// Mutually exclusive interaction modes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Searching { term: String },
    ShowingAbout,
    ConfirmingPurge,
    PickingColor,
}

impl Mode {
    /// About, purge confirmation and color picker
    pub fn is_modal(&self) -> bool {
        matches!(self, Self::ShowingAbout | Self::ConfirmingPurge | Self::PickingColor)
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, Self::Searching { .. })
    }
}

/// Screen width class; decides how the menu and modals coexist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutClass {
    Narrow,
    #[default]
    Wide,
}

impl LayoutClass {
    pub fn for_width(width: u16, narrow_below: u16) -> Self {
        if width < narrow_below {
            Self::Narrow
        } else {
            Self::Wide
        }
    }
}

/// Named controls that a transition asks to focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    #[default]
    DraftEditor,
    SearchInput,
    AboutClose,
    PurgeCancel,
    ColorPickerClose,
}

/// Receives focus requests. Delivery is best-effort.
pub trait FocusSink {
    fn focus(&mut self, target: FocusTarget);
}

/// Entries of the menu panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Search,
    About,
    Color,
    Purge,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::About => "About",
            Self::Color => "Color",
            Self::Purge => "Purge",
        }
    }

    pub fn all() -> &'static [MenuAction] {
        &[Self::Search, Self::About, Self::Color, Self::Purge]
    }
}

/// Tracks the active mode and the menu panel
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
    menu_open: bool,
    layout: LayoutClass,
}

impl ModeController {
    pub fn new(layout: LayoutClass) -> Self {
        Self {
            mode: Mode::Normal,
            menu_open: false,
            layout,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn layout(&self) -> LayoutClass {
        self.layout
    }

    /// Current search term; empty outside search mode
    pub fn search_term(&self) -> &str {
        match &self.mode {
            Mode::Searching { term } => term,
            _ => "",
        }
    }

    pub fn editor_enabled(&self) -> bool {
        !self.mode.is_modal()
    }

    pub fn search_enabled(&self) -> bool {
        self.mode.is_searching()
    }

    pub fn menu_toggle_enabled(&self) -> bool {
        !self.mode.is_modal()
    }

    pub fn request_search(&mut self) -> Option<FocusTarget> {
        if self.mode.is_modal() {
            return None;
        }
        if !self.mode.is_searching() {
            self.mode = Mode::Searching { term: String::new() };
        }
        if self.layout == LayoutClass::Narrow {
            self.menu_open = false;
        }
        debug!("entered search");
        Some(FocusTarget::SearchInput)
    }

    pub fn update_search_term(&mut self, new_term: impl Into<String>) -> bool {
        match &mut self.mode {
            Mode::Searching { term } => {
                *term = new_term.into();
                true
            }
            _ => false,
        }
    }

    pub fn exit_search(&mut self) -> Option<FocusTarget> {
        if !self.mode.is_searching() {
            return None;
        }
        self.mode = Mode::Normal;
        Some(FocusTarget::DraftEditor)
    }

    pub fn request_about(&mut self) -> Option<FocusTarget> {
        self.enter_modal(Mode::ShowingAbout, FocusTarget::AboutClose)
    }

    pub fn request_purge_confirm(&mut self) -> Option<FocusTarget> {
        self.enter_modal(Mode::ConfirmingPurge, FocusTarget::PurgeCancel)
    }

    pub fn request_color_picker(&mut self) -> Option<FocusTarget> {
        self.enter_modal(Mode::PickingColor, FocusTarget::ColorPickerClose)
    }

    // Entering a modal replaces whatever exclusive mode was active
    fn enter_modal(&mut self, modal: Mode, focus: FocusTarget) -> Option<FocusTarget> {
        debug!(?modal, "entering modal");
        self.mode = modal;
        if self.layout == LayoutClass::Narrow {
            self.menu_open = true;
        }
        Some(focus)
    }

    pub fn dismiss(&mut self) -> Option<FocusTarget> {
        if !self.mode.is_modal() {
            return None;
        }
        self.mode = Mode::Normal;
        if self.layout == LayoutClass::Narrow {
            self.menu_open = false;
        }
        Some(FocusTarget::DraftEditor)
    }

    /// Flip the menu. Disabled while a modal is shown.
    pub fn toggle_menu(&mut self) -> bool {
        if !self.menu_toggle_enabled() {
            return false;
        }
        self.menu_open = !self.menu_open;
        true
    }

    /// Close the menu if it is open and allowed to change
    pub fn close_menu(&mut self) -> bool {
        if self.menu_open && self.menu_toggle_enabled() {
            self.menu_open = false;
            true
        } else {
            false
        }
    }

    /// React to a resize
    pub fn set_layout(&mut self, layout: LayoutClass) {
        if self.layout == layout {
            return;
        }
        self.layout = layout;
        if layout == LayoutClass::Narrow {
            if self.mode.is_modal() {
                self.menu_open = true;
            } else if self.mode.is_searching() {
                self.menu_open = false;
            }
        }
    }
}
