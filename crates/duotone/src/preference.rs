//! The two-valued theme preference and its display strings.
//!
//! A preference is either [`Light`](ThemePreference::Light) or
//! [`Dark`](ThemePreference::Dark). The wire form used by preference
//! stores is the lowercase name (`"light"` / `"dark"`).
//!
//! The toggle control always advertises the *next* action: while the dark
//! theme is active it shows the light-theme affordance, and vice versa.
//! The glyph and label helpers here encode that inversion so callers never
//! have to flip the value themselves.

use std::fmt;
use std::str::FromStr;

/// The user's theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    /// Light mode (light background, dark text).
    Light,
    /// Dark mode (dark background, light text).
    Dark,
}

impl ThemePreference {
    /// Returns the other variant.
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// The wire form stored under the `theme` key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Human-readable theme title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Light => "Светлая тема",
            Self::Dark => "Тёмная тема",
        }
    }

    /// Glyph shown on the toggle control while this theme is active.
    ///
    /// The glyph names the action the control will perform next, so the
    /// active dark theme shows the sun and the active light theme shows
    /// the moon.
    pub fn control_icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }

    /// Label shown on the toggle control while this theme is active.
    ///
    /// Like [`control_icon`](Self::control_icon), the label describes the
    /// opposite theme.
    pub fn control_label(self) -> &'static str {
        self.opposite().title()
    }

    /// Announcement text for the confirmation notification.
    pub fn announcement(self) -> &'static str {
        match self {
            Self::Light => "Светлая тема включена",
            Self::Dark => "Тёмная тема включена",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown preference string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme preference '{0}' (expected 'light' or 'dark').")]
pub struct ParsePreferenceError(pub String);

impl FromStr for ThemePreference {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParsePreferenceError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for theme in [ThemePreference::Light, ThemePreference::Dark] {
            assert_eq!(theme.opposite().opposite(), theme);
            assert_ne!(theme.opposite(), theme);
        }
    }

    #[test]
    fn test_wire_form_round_trips() {
        for theme in [ThemePreference::Light, ThemePreference::Dark] {
            assert_eq!(theme.as_str().parse::<ThemePreference>(), Ok(theme));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        let err = "solarized".parse::<ThemePreference>().unwrap_err();
        assert_eq!(err, ParsePreferenceError("solarized".to_string()));
    }

    #[test]
    fn test_control_describes_opposite_theme() {
        assert_eq!(ThemePreference::Dark.control_icon(), "☀️");
        assert_eq!(ThemePreference::Dark.control_label(), "Светлая тема");
        assert_eq!(ThemePreference::Light.control_icon(), "🌙");
        assert_eq!(ThemePreference::Light.control_label(), "Тёмная тема");
    }

    #[test]
    fn test_announcement_names_the_new_theme() {
        assert_eq!(
            ThemePreference::Dark.announcement(),
            "Тёмная тема включена"
        );
        assert_eq!(
            ThemePreference::Light.announcement(),
            "Светлая тема включена"
        );
    }
}
