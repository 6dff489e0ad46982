/// JetBrains Rider recent projects
///
/// Every `Rider*` config folder has `options/recentProjects.xml` with
/// entries like `<entry key="$USER_HOME$/src/App/App.sln">`. The keys are
/// pulled out with a regex rather than a real XML parse.

use crate::core::entry::{folder_name, modified_time, Entry, Origin};
use crate::sources::{dirs_with_prefix, RecentSource, SourceRoots};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing::debug;

const HOME_PLACEHOLDER: &str = "$USER_HOME$";

static KEY_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"key="([^"]+)""#).expect("valid key attribute regex"));

/// Rider source
pub struct RiderSource;

impl RecentSource for RiderSource {
    fn name(&self) -> &'static str {
        "rider"
    }

    fn collect(&self, roots: &SourceRoots) -> Vec<Entry> {
        let jetbrains = roots.app_data.join("JetBrains");

        dirs_with_prefix(&jetbrains, "Rider")
            .into_iter()
            .map(|dir| dir.join("options").join("recentProjects.xml"))
            .flat_map(|file| read_recent_projects(&file, &roots.home))
            .collect()
    }
}

fn read_recent_projects(path: &Path, home: &Path) -> Vec<Entry> {
    if !path.is_file() {
        return Vec::new();
    }

    let xml = match std::fs::read_to_string(path) {
        Ok(xml) => xml,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping unreadable recentProjects.xml");
            return Vec::new();
        }
    };

    scan_recent_projects(&xml, home)
        .into_iter()
        .filter(|p| p.exists())
        .map(|p| {
            let display_name = rider_display_name(&p);
            let last_accessed = modified_time(&p).unwrap_or(DateTime::<Utc>::MIN_UTC);
            Entry::new(p, display_name, last_accessed, Origin::Rider)
        })
        .collect()
}

/// Candidate project paths from a recentProjects.xml document
///
/// Expands `$USER_HOME$` and converts separators to the native one.
pub fn scan_recent_projects(xml: &str, home: &Path) -> Vec<PathBuf> {
    let home = home.to_string_lossy();

    KEY_ATTRIBUTE
        .captures_iter(xml)
        .map(|caps| {
            let raw = caps[1].replace(HOME_PLACEHOLDER, &home);
            PathBuf::from(raw.replace('/', &MAIN_SEPARATOR.to_string()))
        })
        .collect()
}

/// Solutions show their stem, folders their name
fn rider_display_name(path: &Path) -> String {
    let is_sln = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("sln"))
        .unwrap_or(false);

    match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) if is_sln => stem.to_string(),
        _ => folder_name(path),
    }
}
