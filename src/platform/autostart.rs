/// Start-at-logon toggle
///
/// Autostart is on when the per-user Run key has a value named after the
/// app. The value holds the quoted path of the current executable.

use crate::error::Result;
use crate::platform::registry;
use std::path::Path;

const RUN_KEY: &str = "HKCU\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Run";

/// Registry value name
pub const APP_NAME: &str = "ClaudeLauncher";

/// Autostart registration
pub struct AutoStart {
    value_name: String,
}

impl Default for AutoStart {
    fn default() -> Self {
        Self::new(APP_NAME)
    }
}

impl AutoStart {
    pub fn new(value_name: impl Into<String>) -> Self {
        Self {
            value_name: value_name.into(),
        }
    }

    pub fn is_enabled(&self) -> Result<bool> {
        Ok(registry::query_value(RUN_KEY, &self.value_name)?.is_some())
    }

    /// Register or unregister the current executable
    pub fn set_enabled(&self, enable: bool) -> Result<()> {
        if enable {
            let exe = std::env::current_exe()?;
            registry::set_string_value(RUN_KEY, &self.value_name, &run_command_value(&exe))
        } else {
            registry::delete_value(RUN_KEY, &self.value_name)
        }
    }
}

/// Data stored under the Run key for `exe`
pub fn run_command_value(exe: &Path) -> String {
    format!("\"{}\"", exe.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(not(windows))]
    use crate::error::LauncherError;

    #[test]
    fn test_run_command_value_is_quoted() {
        let value = run_command_value(Path::new("C:\\Program Files\\Claude Launcher\\app.exe"));
        assert_eq!(value, "\"C:\\Program Files\\Claude Launcher\\app.exe\"");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_unsupported_off_windows() {
        let autostart = AutoStart::default();
        assert!(matches!(autostart.is_enabled(), Err(LauncherError::Unsupported(_))));
        assert!(autostart.set_enabled(false).is_err());
    }
}
