/// claude-launcher library
///
/// Collects recently used solutions and folders from Visual Studio, VS Code,
/// Rider and user-added folders, ranks them, and starts claude in the one
/// you pick.

pub mod core;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sources;
pub mod ui;

// Re-exports for convenience
pub use crate::core::{Aggregator, Entry, Launcher, Origin, Searcher};
pub use error::{LauncherError, Result};
pub use settings::{SettingsStore, UserSettings};
