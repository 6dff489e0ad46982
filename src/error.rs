/// Error types for claude-launcher
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for claude-launcher operations
#[derive(Error, Debug)]
pub enum LauncherError {
    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Git-related errors
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Nothing in the recent list matched the request
    #[error("No recent entry matches: {0}")]
    EntryNotFound(String),

    /// Launch directory vanished since the entry was discovered
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The terminal process could not be started
    #[error("Failed to launch {terminal}: {message}")]
    LaunchFailed { terminal: String, message: String },

    /// Hotkey chord could not be parsed
    #[error("Invalid hotkey: {0}")]
    InvalidHotkey(String),

    /// Feature not available on this platform
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for claude-launcher operations
pub type Result<T> = std::result::Result<T, LauncherError>;

/// Convert LauncherError to a user-friendly error message
impl LauncherError {
    pub fn user_message(&self) -> String {
        match self {
            LauncherError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            LauncherError::Serialization(e) => {
                format!("Settings file is not valid JSON. Details: {}", e)
            }
            LauncherError::Git(e) => {
                format!("Git operation failed. Details: {}", e)
            }
            LauncherError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            LauncherError::EntryNotFound(query) => {
                format!("Nothing in the recent list matches '{}'", query)
            }
            LauncherError::DirectoryNotFound(dir) => {
                format!("Directory not found: {}", dir.display())
            }
            LauncherError::LaunchFailed { terminal, message } => {
                format!("Failed to launch Claude in {}: {}", terminal, message)
            }
            LauncherError::InvalidHotkey(chord) => {
                format!("'{}' is not a valid hotkey (try Ctrl+Shift+C)", chord)
            }
            LauncherError::Unsupported(what) => {
                format!("{} is not supported on this system", what)
            }
            LauncherError::Generic(msg) => msg.clone(),
        }
    }
}
