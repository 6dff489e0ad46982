/// UI models
///
/// Pure data behind the tray menu, hotkey and colour scheme. Rendering and
/// OS registration live in the host shell.

pub mod hotkey;
pub mod theme;
pub mod tray_menu;

pub use hotkey::HotkeyChord;
pub use theme::{Palette, Rgb};
pub use tray_menu::{tooltip_text, MenuAction, MenuItem, TrayMenu};
