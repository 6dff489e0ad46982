/// Settings persistence
///
/// Loads and saves `UserSettings` as a JSON document in the per-user
/// config directory. The store is constructed explicitly and passed to
/// whoever needs it; there is no global instance.

use crate::error::{LauncherError, Result};
use crate::settings::models::UserSettings;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Folder under the user config dir that holds settings.json
const APP_DIR_NAME: &str = "ClaudeLauncher";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Settings file handle plus its in-memory state
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: UserSettings,
}

impl SettingsStore {
    /// Where settings live by default (`%APPDATA%\ClaudeLauncher\settings.json`
    /// on Windows)
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            LauncherError::Config("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Open the store at the default location
    pub async fn open_default() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self::open(path).await)
    }

    /// Open the store at `path`
    ///
    /// Never fails: a missing or unreadable file just gives the defaults.
    pub async fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let settings = match Self::load(&path).await {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                debug!(path = %path.display(), "no settings file, using defaults");
                UserSettings::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read settings, using defaults");
                UserSettings::default()
            }
        };

        Self { path, settings }
    }

    /// Wrap already-built settings, e.g. for tests
    pub fn with_settings<P: AsRef<Path>>(path: P, settings: UserSettings) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            settings,
        }
    }

    async fn load(path: &Path) -> Result<Option<UserSettings>> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(None);
        }

        let json = tokio::fs::read_to_string(path).await?;
        let settings = serde_json::from_str(&json)?;
        Ok(Some(settings))
    }

    /// Write the current settings to disk
    ///
    /// Creates the parent directory if needed.
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.settings)?;
        tokio::fs::write(&self.path, json).await?;

        Ok(())
    }

    /// Save, but only log a failure
    ///
    /// Mutations keep their in-memory effect either way; the next mutation
    /// tries to save again.
    pub async fn persist(&self) {
        if let Err(e) = self.save().await {
            warn!(path = %self.path.display(), error = %e, "failed to save settings");
        }
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply an arbitrary change and persist it
    pub async fn update<F>(&mut self, change: F)
    where
        F: FnOnce(&mut UserSettings),
    {
        change(&mut self.settings);
        self.persist().await;
    }

    /// Remember a successful launch
    pub async fn record_launch(&mut self, path: &str) {
        self.settings.add_to_history(path);
        self.persist().await;
    }

    /// Pin or unpin a path, returning whether it is now pinned
    pub async fn toggle_pin(&mut self, path: &str) -> bool {
        let pinned = self.settings.toggle_pin(path);
        self.persist().await;
        pinned
    }

    pub async fn add_custom_folder(&mut self, path: &str, display_name: Option<&str>) -> bool {
        let added = self.settings.add_custom_folder(path, display_name);
        if added {
            self.persist().await;
        }
        added
    }

    pub async fn remove_custom_folder(&mut self, path: &str) -> bool {
        let removed = self.settings.remove_custom_folder(path);
        if removed {
            self.persist().await;
        }
        removed
    }
}
