/// Settings module
///
/// User preferences, pins, custom folders and launch history, persisted as JSON.

pub mod models;
pub mod store;

pub use models::{CustomFolder, ThemeMode, UserSettings, DEFAULT_MAX_HISTORY_ITEMS};
pub use store::SettingsStore;
