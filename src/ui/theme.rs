/// Popup colour scheme
///
/// Resolves the configured theme mode to dark or light and hands out the
/// matching palette.

use crate::error::Result;
use crate::platform::registry;
use crate::settings::ThemeMode;
use tracing::debug;

const PERSONALIZE_KEY: &str = "HKCU\\Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize";

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Colours used by the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub search_box: Rgb,
    pub border: Rgb,
    pub primary_text: Rgb,
    pub secondary_text: Rgb,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Rgb(0x1E, 0x1E, 0x1E),
        search_box: Rgb(0x2D, 0x2D, 0x2D),
        border: Rgb(0x3C, 0x3C, 0x3C),
        primary_text: Rgb(0xE0, 0xE0, 0xE0),
        secondary_text: Rgb(0x80, 0x80, 0x80),
    };

    pub const LIGHT: Palette = Palette {
        background: Rgb(0xF3, 0xF3, 0xF3),
        search_box: Rgb(0xFF, 0xFF, 0xFF),
        border: Rgb(0xCC, 0xCC, 0xCC),
        primary_text: Rgb(0x1E, 0x1E, 0x1E),
        secondary_text: Rgb(0x60, 0x60, 0x60),
    };

    pub fn for_dark(dark: bool) -> Palette {
        if dark {
            Palette::DARK
        } else {
            Palette::LIGHT
        }
    }

    /// Palette for a mode, asking the OS when the mode is System
    pub fn for_mode(mode: ThemeMode) -> Palette {
        Palette::for_dark(is_dark(mode, system_prefers_dark))
    }
}

/// Whether `mode` means dark; `system_dark` is only called for System
pub fn is_dark<F>(mode: ThemeMode, system_dark: F) -> bool
where
    F: FnOnce() -> bool,
{
    match mode {
        ThemeMode::Dark => true,
        ThemeMode::Light => false,
        ThemeMode::System => system_dark(),
    }
}

/// Read the Windows app theme
pub fn system_prefers_dark() -> bool {
    dark_from_light_theme_value(registry::query_value(PERSONALIZE_KEY, "AppsUseLightTheme"))
}

/// Dark only when `AppsUseLightTheme` is 0
///
/// A missing or non-numeric value means light; a failed read means dark.
fn dark_from_light_theme_value(value: Result<Option<String>>) -> bool {
    match value {
        Ok(Some(value)) => parse_dword(&value) == Some(0),
        Ok(None) => false,
        Err(e) => {
            debug!(error = %e, "could not read system theme, assuming dark");
            true
        }
    }
}

/// `reg query` prints DWORDs as hex, e.g. "0x1"
fn parse_dword(value: &str) -> Option<u32> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}
