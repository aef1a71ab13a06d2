//! Keyboard chord matching for the toggle shortcut.

use std::fmt;

/// A keyboard modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Alt,
    Ctrl,
    Shift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alt => "Alt",
            Self::Ctrl => "Ctrl",
            Self::Shift => "Shift",
        })
    }
}

/// A modifier-plus-letter keyboard chord.
///
/// Matching is case-insensitive on the letter, so the chord fires whether
/// or not the host reports the key with Shift applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    /// The required modifier key.
    pub modifier: Modifier,
    /// The letter key, stored lowercase.
    pub key: char,
}

/// The default toggle shortcut, Alt+T.
pub const DEFAULT_TOGGLE_CHORD: KeyChord = KeyChord {
    modifier: Modifier::Alt,
    key: 't',
};

impl KeyChord {
    /// Creates a chord from a modifier and a letter.
    pub fn new(modifier: Modifier, key: char) -> Self {
        Self {
            modifier,
            key: key.to_ascii_lowercase(),
        }
    }

    /// Returns true if a key event matches this chord.
    pub fn matches(&self, modifier: Option<Modifier>, key: char) -> bool {
        modifier == Some(self.modifier) && key.to_ascii_lowercase() == self.key
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.modifier, self.key.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chord_is_alt_t() {
        assert_eq!(DEFAULT_TOGGLE_CHORD.to_string(), "Alt+T");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let chord = KeyChord::new(Modifier::Alt, 'T');
        assert!(chord.matches(Some(Modifier::Alt), 't'));
        assert!(chord.matches(Some(Modifier::Alt), 'T'));
    }

    #[test]
    fn test_wrong_modifier_or_key_does_not_match() {
        let chord = DEFAULT_TOGGLE_CHORD;
        assert!(!chord.matches(Some(Modifier::Ctrl), 't'));
        assert!(!chord.matches(None, 't'));
        assert!(!chord.matches(Some(Modifier::Alt), 'x'));
    }
}
