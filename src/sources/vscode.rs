/// VS Code (and Insiders / VSCodium) recent folders
///
/// Reads `storage.json` and walks `openedPathsList.entries`. Only folders
/// that still exist on disk are kept.

use crate::core::entry::{folder_name, modified_time, Entry, Origin};
use crate::error::Result;
use crate::sources::{RecentSource, SourceRoots};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Product folders under `%APPDATA%` that hold a storage.json
const EDITOR_DIRS: &[&str] = &["Code", "Code - Insiders", "VSCodium"];

const STORAGE_FILE: &str = "storage.json";
const FILE_URI_PREFIX: &str = "file:///";

/// VS Code source
pub struct VsCodeSource;

impl RecentSource for VsCodeSource {
    fn name(&self) -> &'static str {
        "vscode"
    }

    fn collect(&self, roots: &SourceRoots) -> Vec<Entry> {
        EDITOR_DIRS
            .iter()
            .map(|dir| roots.app_data.join(dir).join(STORAGE_FILE))
            .flat_map(|storage| read_storage(&storage))
            .collect()
    }
}

fn read_storage(path: &Path) -> Vec<Entry> {
    if !path.is_file() {
        return Vec::new();
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(Into::into)
        .and_then(|json| parse_storage(&json));

    match parsed {
        Ok(folders) => folders
            .into_iter()
            .filter(|folder| folder.is_dir())
            .map(|folder| {
                let display_name = folder_name(&folder);
                let last_accessed = modified_time(&folder).unwrap_or(DateTime::<Utc>::MIN_UTC);
                Entry::new(folder, display_name, last_accessed, Origin::VsCode)
            })
            .collect(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping unreadable storage.json");
            Vec::new()
        }
    }
}

/// Folder paths listed in a storage.json document
///
/// Each entry contributes its `folderUri`, or failing that its
/// `workspace.configPath`. Non-`file:///` URIs are dropped.
pub fn parse_storage(json: &str) -> Result<Vec<PathBuf>> {
    let doc: Value = serde_json::from_str(json)?;

    let Some(entries) = doc
        .get("openedPathsList")
        .and_then(|list| list.get("entries"))
        .and_then(Value::as_array)
    else {
        return Ok(Vec::new());
    };

    let folders = entries
        .iter()
        .filter_map(|entry| {
            let uri = match entry.get("folderUri") {
                Some(folder_uri) => folder_uri.as_str(),
                None => entry
                    .get("workspace")
                    .and_then(|w| w.get("configPath"))
                    .and_then(Value::as_str),
            };
            uri.and_then(uri_to_path)
        })
        .collect();

    Ok(folders)
}

/// Turn a `file:///` URI into a native path
///
/// `file:///c%3A/Users/me/app` becomes `c:\Users\me\app` on Windows. On
/// other hosts the leading slash is kept so the path stays absolute.
pub fn uri_to_path(uri: &str) -> Option<PathBuf> {
    let rest = uri.strip_prefix(FILE_URI_PREFIX)?;
    if rest.is_empty() {
        return None;
    }

    let decoded = urlencoding::decode(rest).ok()?;

    if cfg!(windows) {
        Some(PathBuf::from(decoded.replace('/', "\\")))
    } else {
        Some(PathBuf::from(format!("/{}", decoded)))
    }
}
