//! Color themes handed to the renderer.
//!
//! The core never reads colors itself. The session holds the active
//! [`Theme`] and passes its [`ThemePalette`] along with each frame.

use std::fmt;

use serde::Serialize;

/// UI color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark background, light strokes.
    #[default]
    Dark,
    /// Light background, dark strokes.
    Light,
}

/// Color tokens for one theme, as CSS color strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePalette {
    /// Page background.
    pub background: &'static str,
    /// Canvas background.
    pub canvas: &'static str,
    /// Node circle fill.
    pub node_fill: &'static str,
    /// Node circle outline.
    pub node_stroke: &'static str,
    /// Key label inside a node.
    pub node_text: &'static str,
    /// Edge line color.
    pub edge: &'static str,
    /// Enabled palette button.
    pub button: &'static str,
    /// Palette button whose value is already in the tree.
    pub button_disabled: &'static str,
    /// Most recently inserted node.
    pub highlight: &'static str,
}

const DARK: ThemePalette = ThemePalette {
    background: "#111827",
    canvas: "#1f2937",
    node_fill: "#3b82f6",
    node_stroke: "#93c5fd",
    node_text: "#f9fafb",
    edge: "#9ca3af",
    button: "#2563eb",
    button_disabled: "#4b5563",
    highlight: "#f59e0b",
};

const LIGHT: ThemePalette = ThemePalette {
    background: "#f3f4f6",
    canvas: "#ffffff",
    node_fill: "#60a5fa",
    node_stroke: "#1d4ed8",
    node_text: "#111827",
    edge: "#374151",
    button: "#3b82f6",
    button_disabled: "#d1d5db",
    highlight: "#d97706",
};

impl Theme {
    /// Parse a theme name (`"dark"` or `"light"`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Color tokens for this theme.
    pub fn palette(self) -> ThemePalette {
        match self {
            Self::Dark => DARK,
            Self::Light => LIGHT,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_name(" Light "), Some(Theme::Light));
        assert_eq!(Theme::from_name("sepia"), None);
    }

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_palettes_differ() {
        let dark = Theme::Dark.palette();
        let light = Theme::Light.palette();
        assert_ne!(dark, light);
        assert_ne!(dark.background, light.background);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Theme::Light), "light");
    }
}
