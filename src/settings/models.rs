/// Persisted user settings
///
/// Field names are serialized in PascalCase so existing settings.json files
/// keep loading. Every field has a default, so a partial or older file still
/// deserializes.

use crate::core::entry::canonical_key;
use crate::platform::TerminalKind;
use serde::{Deserialize, Serialize};

/// Default number of launches remembered in history
pub const DEFAULT_MAX_HISTORY_ITEMS: usize = 10;

/// Color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    System,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
            ThemeMode::System => "system",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            "system" => Ok(ThemeMode::System),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// A folder the user added by hand
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CustomFolder {
    pub path: String,
    pub display_name: String,
}

/// Everything the launcher remembers between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserSettings {
    // Terminal
    pub terminal: TerminalKind,
    pub claude_arguments: String,

    // Hotkey
    pub hotkey_ctrl: bool,
    pub hotkey_shift: bool,
    pub hotkey_alt: bool,
    pub hotkey_win: bool,
    pub hotkey_key: String,

    pub theme: ThemeMode,

    // Popup position
    pub window_left: Option<f64>,
    pub window_top: Option<f64>,

    pub pinned_paths: Vec<String>,
    pub custom_folders: Vec<CustomFolder>,

    /// Most recent first
    pub launch_history: Vec<String>,
    pub max_history_items: usize,

    // Sources
    pub include_visual_studio: bool,
    #[serde(rename = "IncludeVSCode")]
    pub include_vs_code: bool,
    pub include_rider: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            terminal: TerminalKind::WindowsTerminal,
            claude_arguments: String::new(),
            hotkey_ctrl: true,
            hotkey_shift: true,
            hotkey_alt: false,
            hotkey_win: false,
            hotkey_key: "C".to_string(),
            theme: ThemeMode::Dark,
            window_left: None,
            window_top: None,
            pinned_paths: Vec::new(),
            custom_folders: Vec::new(),
            launch_history: Vec::new(),
            max_history_items: DEFAULT_MAX_HISTORY_ITEMS,
            include_visual_studio: true,
            include_vs_code: true,
            include_rider: true,
        }
    }
}

impl UserSettings {
    /// Push a launched path to the front of the history
    ///
    /// Any earlier occurrence of the same path is dropped first, and the
    /// list is cut back to `max_history_items`.
    pub fn add_to_history(&mut self, path: &str) {
        let key = canonical_key(path);
        self.launch_history.retain(|p| canonical_key(p) != key);
        self.launch_history.insert(0, path.to_string());
        self.launch_history.truncate(self.max_history_items);
    }

    /// Flip the pinned state of a path, returning the new state
    pub fn toggle_pin(&mut self, path: &str) -> bool {
        let key = canonical_key(path);
        let before = self.pinned_paths.len();
        self.pinned_paths.retain(|p| canonical_key(p) != key);

        if self.pinned_paths.len() == before {
            self.pinned_paths.push(path.to_string());
            true
        } else {
            false
        }
    }

    pub fn is_pinned(&self, path: &str) -> bool {
        let key = canonical_key(path);
        self.pinned_paths.iter().any(|p| canonical_key(p) == key)
    }

    /// Position of a path in the launch history (0 = most recent)
    pub fn history_index(&self, path: &str) -> Option<usize> {
        let key = canonical_key(path);
        self.launch_history
            .iter()
            .position(|p| canonical_key(p) == key)
    }

    /// Add a custom folder unless it's already there
    ///
    /// Returns false when the folder was already configured.
    pub fn add_custom_folder(&mut self, path: &str, display_name: Option<&str>) -> bool {
        let key = canonical_key(path);
        if self.custom_folders.iter().any(|f| canonical_key(&f.path) == key) {
            return false;
        }

        self.custom_folders.push(CustomFolder {
            path: path.to_string(),
            display_name: display_name.unwrap_or_default().to_string(),
        });
        true
    }

    /// Remove a custom folder, returning whether anything was removed
    pub fn remove_custom_folder(&mut self, path: &str) -> bool {
        let key = canonical_key(path);
        let before = self.custom_folders.len();
        self.custom_folders.retain(|f| canonical_key(&f.path) != key);
        self.custom_folders.len() != before
    }
}
