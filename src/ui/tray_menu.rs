/// Tray context menu contents
///
/// Builds the item list the tray icon shows; drawing it is up to the host.

use crate::core::entry::Entry;
use crate::settings::UserSettings;
use crate::ui::hotkey::HotkeyChord;
use std::path::PathBuf;

/// How many recent entries fit directly in the menu
pub const MAX_MENU_ENTRIES: usize = 10;

/// Prefix marking pinned entries
pub const PINNED_MARKER: &str = "* ";

/// What clicking an item does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    ShowSearch,
    Launch(PathBuf),
    ShowSettings,
    Refresh,
    Exit,
    /// Disabled informational row
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Separator,
    Item {
        label: String,
        tooltip: Option<String>,
        enabled: bool,
        bold: bool,
        action: MenuAction,
    },
}

impl MenuItem {
    fn action(label: impl Into<String>, action: MenuAction) -> Self {
        MenuItem::Item {
            label: label.into(),
            tooltip: None,
            enabled: true,
            bold: false,
            action,
        }
    }

    fn disabled(label: impl Into<String>) -> Self {
        MenuItem::Item {
            label: label.into(),
            tooltip: None,
            enabled: false,
            bold: false,
            action: MenuAction::Nothing,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            MenuItem::Separator => None,
            MenuItem::Item { label, .. } => Some(label),
        }
    }
}

/// The full tray menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayMenu {
    pub items: Vec<MenuItem>,
}

impl TrayMenu {
    /// Build the menu for an already ranked list
    pub fn build(entries: &[Entry], settings: &UserSettings) -> Self {
        let hotkey = HotkeyChord::from_settings(settings);
        let mut items = vec![
            MenuItem::Item {
                label: format!("Search Solutions... ({})", hotkey.label()),
                tooltip: None,
                enabled: true,
                bold: true,
                action: MenuAction::ShowSearch,
            },
            MenuItem::Separator,
        ];

        if entries.is_empty() {
            items.push(MenuItem::disabled("No recent solutions found"));
        } else {
            for entry in entries.iter().take(MAX_MENU_ENTRIES) {
                let label = if entry.is_pinned(settings) {
                    format!("{}{}", PINNED_MARKER, entry.display_name)
                } else {
                    entry.display_name.clone()
                };

                items.push(MenuItem::Item {
                    label,
                    tooltip: Some(entry.path.display().to_string()),
                    enabled: true,
                    bold: false,
                    action: MenuAction::Launch(entry.path.clone()),
                });
            }

            if entries.len() > MAX_MENU_ENTRIES {
                items.push(MenuItem::disabled(format!(
                    "... and {} more (use Search)",
                    entries.len() - MAX_MENU_ENTRIES
                )));
            }
        }

        items.push(MenuItem::Separator);
        items.push(MenuItem::action("Settings...", MenuAction::ShowSettings));
        items.push(MenuItem::action("Refresh", MenuAction::Refresh));
        items.push(MenuItem::action("Exit", MenuAction::Exit));

        Self { items }
    }
}

/// Hover text for the tray icon
pub fn tooltip_text(settings: &UserSettings) -> String {
    format!("Claude Launcher ({})", HotkeyChord::from_settings(settings).label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::Origin;
    use chrono::Utc;

    fn entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| Entry::new(format!("/p/{}", i), format!("Project {}", i), Utc::now(), Origin::Custom))
            .collect()
    }

    fn labels(menu: &TrayMenu) -> Vec<Option<&str>> {
        menu.items.iter().map(|i| i.label()).collect()
    }

    #[test]
    fn test_empty_menu() {
        let menu = TrayMenu::build(&[], &UserSettings::default());
        assert_eq!(
            labels(&menu),
            vec![
                Some("Search Solutions... (Ctrl+Shift+C)"),
                None,
                Some("No recent solutions found"),
                None,
                Some("Settings..."),
                Some("Refresh"),
                Some("Exit"),
            ]
        );
    }

    #[test]
    fn test_truncated_menu() {
        let menu = TrayMenu::build(&entries(13), &UserSettings::default());
        let launch_count = menu
            .items
            .iter()
            .filter(|i| matches!(i, MenuItem::Item { action: MenuAction::Launch(_), .. }))
            .count();

        assert_eq!(launch_count, 10);
        assert!(labels(&menu).contains(&Some("... and 3 more (use Search)")));
    }

    #[test]
    fn test_pinned_marker_and_tooltip() {
        let mut settings = UserSettings::default();
        settings.toggle_pin("/p/1");

        let menu = TrayMenu::build(&entries(2), &settings);
        match &menu.items[3] {
            MenuItem::Item { label, tooltip, .. } => {
                assert_eq!(label, "* Project 1");
                assert_eq!(tooltip.as_deref(), Some("/p/1"));
            }
            other => panic!("Expected item, got {:?}", other),
        }
    }

    #[test]
    fn test_tooltip_text() {
        assert_eq!(tooltip_text(&UserSettings::default()), "Claude Launcher (Ctrl+Shift+C)");
    }
}
