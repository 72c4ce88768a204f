//! Display preferences persisted next to the session cache

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` reads as light
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub custom_cursor_enabled: bool,
}

impl Preferences {
    pub fn toggle_theme(self) -> Self {
        Self {
            theme: self.theme.toggle(),
            ..self
        }
    }

    pub fn toggle_cursor(self) -> Self {
        Self {
            custom_cursor_enabled: !self.custom_cursor_enabled,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_stored() {
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("purple")), Theme::Light);
        assert_eq!(Theme::from_stored(None), Theme::Light);
    }

    #[test]
    fn test_toggles() {
        let prefs = Preferences::default();
        assert_eq!(prefs.toggle_theme().theme, Theme::Dark);
        assert!(prefs.toggle_cursor().custom_cursor_enabled);
        assert_eq!(prefs.toggle_theme().toggle_theme(), prefs);
    }
}
