/// Platform integration
///
/// Terminal detection, the Run-key autostart toggle and the registry access
/// behind it.

pub mod autostart;
pub mod registry;
pub mod terminal_detector;

pub use autostart::AutoStart;
pub use terminal_detector::{TerminalDetector, TerminalKind};
