/// Folders the user added by hand

use crate::core::entry::{folder_name, modified_time, Entry, Origin};
use crate::settings::CustomFolder;
use crate::sources::{RecentSource, SourceRoots};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Custom folder source
pub struct CustomFolderSource {
    folders: Vec<CustomFolder>,
}

impl CustomFolderSource {
    pub fn new(folders: Vec<CustomFolder>) -> Self {
        Self { folders }
    }
}

impl RecentSource for CustomFolderSource {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn collect(&self, _roots: &SourceRoots) -> Vec<Entry> {
        self.folders
            .iter()
            .filter(|folder| Path::new(&folder.path).is_dir())
            .map(|folder| {
                let display_name = if folder.display_name.is_empty() {
                    folder_name(&folder.path)
                } else {
                    folder.display_name.clone()
                };
                let last_accessed =
                    modified_time(&folder.path).unwrap_or(DateTime::<Utc>::MIN_UTC);

                Entry::new(&folder.path, display_name, last_accessed, Origin::Custom)
            })
            .collect()
    }
}
