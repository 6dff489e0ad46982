/// Per-user base directories the sources read from
///
/// Resolved from the OS by default; tests point them at a temp tree.

use crate::error::{LauncherError, Result};
use std::path::{Path, PathBuf};

/// Base folders for IDE recency stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoots {
    /// `%LOCALAPPDATA%` (Visual Studio)
    pub local_app_data: PathBuf,
    /// `%APPDATA%` (VS Code, Rider)
    pub app_data: PathBuf,
    /// User profile, substituted for `$USER_HOME$`
    pub home: PathBuf,
}

impl SourceRoots {
    /// Resolve the current user's directories
    pub fn from_env() -> Result<Self> {
        let missing = |what: &str| LauncherError::Config(format!("Could not determine {}", what));

        Ok(Self {
            local_app_data: dirs::data_local_dir().ok_or_else(|| missing("local data directory"))?,
            app_data: dirs::data_dir().ok_or_else(|| missing("data directory"))?,
            home: dirs::home_dir().ok_or_else(|| missing("home directory"))?,
        })
    }

    /// All three roots under one base folder
    ///
    /// Layout: `<base>/LocalAppData`, `<base>/AppData`, `<base>/Home`.
    pub fn under<P: AsRef<Path>>(base: P) -> Self {
        let base = base.as_ref();
        Self {
            local_app_data: base.join("LocalAppData"),
            app_data: base.join("AppData"),
            home: base.join("Home"),
        }
    }
}
