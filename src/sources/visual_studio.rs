/// Visual Studio recent solutions
///
/// Reads two stores from each `<LocalAppData>/Microsoft/VisualStudio/<ver>_*`
/// instance folder:
/// - `CodeContainers.json`: the MRU list with FILETIME timestamps.
/// - `ApplicationPrivateSettings.xml`: an older store. There is no schema
///   worth parsing, so it is scanned for quoted strings around ".sln". This
///   is best-effort and will miss or misread unusual content.

use crate::core::entry::{display_name_for, from_filetime, modified_time, Entry, Origin};
use crate::error::Result;
use crate::sources::{dirs_with_prefix, html_decode, RecentSource, SourceRoots};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Instance folder prefixes, newest first (2022, 2019, 2017)
const VS_VERSIONS: &[&str] = &["17.0", "16.0", "15.0"];

const CODE_CONTAINERS_FILE: &str = "CodeContainers.json";
const PRIVATE_SETTINGS_FILE: &str = "ApplicationPrivateSettings.xml";

/// Solution file extensions, lowercase
const SOLUTION_EXTENSIONS: &[&str] = &[".sln", ".slnx"];

/// Visual Studio source
pub struct VisualStudioSource;

impl RecentSource for VisualStudioSource {
    fn name(&self) -> &'static str {
        "visual-studio"
    }

    fn collect(&self, roots: &SourceRoots) -> Vec<Entry> {
        let vs_root = roots.local_app_data.join("Microsoft").join("VisualStudio");
        let mut entries = Vec::new();

        for version in VS_VERSIONS {
            for instance in dirs_with_prefix(&vs_root, &format!("{}_", version)) {
                entries.extend(read_code_containers(&instance.join(CODE_CONTAINERS_FILE)));
                entries.extend(read_private_settings(&instance.join(PRIVATE_SETTINGS_FILE)));
            }
        }

        entries
    }
}

/// Whether a path names a .sln or .slnx file
pub fn is_solution_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    SOLUTION_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn read_code_containers(path: &Path) -> Vec<Entry> {
    if !path.is_file() {
        return Vec::new();
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(Into::into)
        .and_then(|json| parse_code_containers(&json));

    match parsed {
        Ok(records) => records
            .into_iter()
            .map(|(full_path, last_accessed)| {
                let display_name = display_name_for(&full_path);
                Entry::new(full_path, display_name, last_accessed, Origin::VisualStudio)
            })
            .collect(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping unreadable CodeContainers.json");
            Vec::new()
        }
    }
}

/// Pull solution paths and MRU times out of a CodeContainers.json document
///
/// Missing or malformed `MRUTime` values fall back to the earliest
/// representable time so those entries sort last.
pub fn parse_code_containers(json: &str) -> Result<Vec<(String, DateTime<Utc>)>> {
    let doc: Value = serde_json::from_str(json)?;

    let Some(containers) = doc.get("CodeContainers").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let records = containers
        .iter()
        .filter_map(|container| {
            let value = container.get("Value")?;
            let full_path = value
                .get("LocalProperties")?
                .get("FullPath")?
                .as_str()?;

            if full_path.is_empty() || !is_solution_path(full_path) {
                return None;
            }

            let last_accessed = value
                .get("MRUTime")
                .and_then(Value::as_i64)
                .and_then(from_filetime)
                .unwrap_or(DateTime::<Utc>::MIN_UTC);

            Some((full_path.to_string(), last_accessed))
        })
        .collect();

    Ok(records)
}

fn read_private_settings(path: &Path) -> Vec<Entry> {
    if !path.is_file() {
        return Vec::new();
    }

    let xml = match std::fs::read_to_string(path) {
        Ok(xml) => xml,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping unreadable ApplicationPrivateSettings.xml");
            return Vec::new();
        }
    };

    scan_private_settings(&xml)
        .into_iter()
        .filter(|candidate| Path::new(candidate).is_file())
        .map(|full_path| {
            let display_name = display_name_for(&full_path);
            let last_accessed = modified_time(&full_path).unwrap_or(DateTime::<Utc>::MIN_UTC);
            Entry::new(full_path, display_name, last_accessed, Origin::VisualStudio)
        })
        .collect()
}

/// Find quoted strings surrounding each ".sln" occurrence
///
/// For every match, the nearest quote before and after delimit the
/// candidate, which is then HTML-decoded. Candidates are not checked
/// against the filesystem here.
pub fn scan_private_settings(xml: &str) -> Vec<String> {
    // ASCII lowercasing keeps byte offsets aligned with `xml`
    let lower = xml.to_ascii_lowercase();
    let mut candidates = Vec::new();
    let mut from = 0;

    while let Some(found) = lower[from..].find(".sln") {
        let at = from + found;

        let start = xml[..at].rfind('"');
        let end = xml[at..].find('"').map(|i| at + i);

        if let (Some(start), Some(end)) = (start, end) {
            let raw = &xml[start + 1..end];
            candidates.push(html_decode(raw));
        }

        from = at + 1;
    }

    candidates
}
