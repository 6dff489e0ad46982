/// Global hotkey chord
///
/// Parsing, display, and the Win32 `RegisterHotKey` modifier/key values.
/// Registering the hotkey itself is left to the host UI.

use crate::error::{LauncherError, Result};
use crate::settings::UserSettings;

pub const MOD_ALT: u32 = 0x0001;
pub const MOD_CONTROL: u32 = 0x0002;
pub const MOD_SHIFT: u32 = 0x0004;
pub const MOD_WIN: u32 = 0x0008;
pub const MOD_NOREPEAT: u32 = 0x4000;

const VK_F1: u32 = 0x70;

/// Modifier set plus a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyChord {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub win: bool,
    pub key: String,
}

impl HotkeyChord {
    pub fn from_settings(settings: &UserSettings) -> Self {
        Self {
            ctrl: settings.hotkey_ctrl,
            shift: settings.hotkey_shift,
            alt: settings.hotkey_alt,
            win: settings.hotkey_win,
            key: settings.hotkey_key.clone(),
        }
    }

    pub fn apply_to(&self, settings: &mut UserSettings) {
        settings.hotkey_ctrl = self.ctrl;
        settings.hotkey_shift = self.shift;
        settings.hotkey_alt = self.alt;
        settings.hotkey_win = self.win;
        settings.hotkey_key = self.key.clone();
    }

    /// Parse something like "Ctrl+Shift+C"
    ///
    /// Modifiers may come in any order and case; the last part is the key.
    pub fn parse(chord: &str) -> Result<Self> {
        let invalid = || LauncherError::InvalidHotkey(chord.to_string());

        let parts: Vec<&str> = chord.split('+').map(str::trim).collect();
        let (key, modifiers) = parts.split_last().ok_or_else(invalid)?;

        if key.is_empty() {
            return Err(invalid());
        }

        let mut parsed = Self {
            ctrl: false,
            shift: false,
            alt: false,
            win: false,
            key: key.to_uppercase(),
        };

        for modifier in modifiers {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => parsed.ctrl = true,
                "shift" => parsed.shift = true,
                "alt" => parsed.alt = true,
                "win" | "windows" | "super" => parsed.win = true,
                _ => return Err(invalid()),
            }
        }

        if parsed.virtual_key().is_none() {
            return Err(invalid());
        }

        Ok(parsed)
    }

    /// Text shown in menus, e.g. "Ctrl+Shift+C"
    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.win {
            parts.push("Win");
        }
        parts.push(&self.key);
        parts.join("+")
    }

    /// `fsModifiers` for RegisterHotKey, always with MOD_NOREPEAT
    pub fn modifier_flags(&self) -> u32 {
        let mut flags = MOD_NOREPEAT;
        if self.ctrl {
            flags |= MOD_CONTROL;
        }
        if self.shift {
            flags |= MOD_SHIFT;
        }
        if self.alt {
            flags |= MOD_ALT;
        }
        if self.win {
            flags |= MOD_WIN;
        }
        flags
    }

    /// Virtual-key code for the key
    ///
    /// Letters and digits map to their uppercase ASCII code, F1 to F24 to
    /// `VK_F1..=VK_F24`. Anything else has no code.
    pub fn virtual_key(&self) -> Option<u32> {
        let key = self.key.to_ascii_uppercase();
        let mut chars = key.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphanumeric() => Some(c as u32),
            (Some('F'), Some(_)) => {
                let n: u32 = key[1..].parse().ok()?;
                (1..=24).contains(&n).then(|| VK_F1 + n - 1)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for HotkeyChord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chord() {
        let chord = HotkeyChord::from_settings(&UserSettings::default());
        assert_eq!(chord.label(), "Ctrl+Shift+C");
        assert_eq!(chord.modifier_flags(), MOD_NOREPEAT | MOD_CONTROL | MOD_SHIFT);
        assert_eq!(chord.virtual_key(), Some(0x43));
    }

    #[test]
    fn test_parse() {
        let chord = HotkeyChord::parse("alt + win + k").unwrap();
        assert!(chord.alt && chord.win);
        assert!(!chord.ctrl && !chord.shift);
        assert_eq!(chord.label(), "Alt+Win+K");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(HotkeyChord::parse("").is_err());
        assert!(HotkeyChord::parse("Ctrl+").is_err());
        assert!(HotkeyChord::parse("Hyper+C").is_err());
        assert!(HotkeyChord::parse("Ctrl+!").is_err());
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(HotkeyChord::parse("Ctrl+F5").unwrap().virtual_key(), Some(0x74));
        assert_eq!(HotkeyChord::parse("alt+f24").unwrap().virtual_key(), Some(0x87));
        assert!(HotkeyChord::parse("Ctrl+F25").is_err());
        assert!(HotkeyChord::parse("Ctrl+F0").is_err());
        assert!(HotkeyChord::parse("Ctrl+Space").is_err());
        assert!(HotkeyChord::parse("Ctrl+AB").is_err());
    }

    #[test]
    fn test_apply_to_settings() {
        let mut settings = UserSettings::default();
        HotkeyChord::parse("Ctrl+Alt+L").unwrap().apply_to(&mut settings);

        assert!(settings.hotkey_ctrl && settings.hotkey_alt);
        assert!(!settings.hotkey_shift);
        assert_eq!(settings.hotkey_key, "L");
    }
}
