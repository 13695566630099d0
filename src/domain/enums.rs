use serde::{Deserialize, Serialize};

/// Accent color chosen in the color picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    #[default]
    Cyan,
    Green,
    Yellow,
    Magenta,
    Blue,
    Red,
    /// Slowly rotates through the palette on every frame
    Cycle,
}

impl ThemeColor {
    /// Display name for the picker
    pub fn name(&self) -> &'static str {
        match self {
            ThemeColor::Cyan => "Cyan",
            ThemeColor::Green => "Green",
            ThemeColor::Yellow => "Yellow",
            ThemeColor::Magenta => "Magenta",
            ThemeColor::Blue => "Blue",
            ThemeColor::Red => "Red",
            ThemeColor::Cycle => "Cycle",
        }
    }

    /// Fixed colors that `Cycle` rotates through
    pub fn palette() -> &'static [ThemeColor] {
        &[
            ThemeColor::Cyan,
            ThemeColor::Green,
            ThemeColor::Yellow,
            ThemeColor::Magenta,
            ThemeColor::Blue,
            ThemeColor::Red,
        ]
    }

    /// Get all choices as a list
    pub fn all() -> &'static [ThemeColor] {
        &[
            ThemeColor::Cyan,
            ThemeColor::Green,
            ThemeColor::Yellow,
            ThemeColor::Magenta,
            ThemeColor::Blue,
            ThemeColor::Red,
            ThemeColor::Cycle,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_color_serde_lowercase() {
        let json = serde_json::to_string(&ThemeColor::Magenta).unwrap();
        assert_eq!(json, "\"magenta\"");
        let back: ThemeColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ThemeColor::Magenta);
    }

    #[test]
    fn test_palette_excludes_cycle() {
        assert!(!ThemeColor::palette().contains(&ThemeColor::Cycle));
        assert_eq!(ThemeColor::all().len(), ThemeColor::palette().len() + 1);
    }
}
