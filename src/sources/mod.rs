/// Recent-item sources
///
/// Each source knows where one IDE keeps its recency data and turns it into
/// `Entry` values. Sources never fail outward: a missing or corrupt store
/// simply contributes nothing.

pub mod custom;
pub mod rider;
pub mod roots;
pub mod visual_studio;
pub mod vscode;

pub use custom::CustomFolderSource;
pub use rider::RiderSource;
pub use roots::SourceRoots;
pub use visual_studio::VisualStudioSource;
pub use vscode::VsCodeSource;

use crate::core::entry::Entry;
use std::path::{Path, PathBuf};

/// Something that can list recently used entries
pub trait RecentSource {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Everything this source can find right now
    fn collect(&self, roots: &SourceRoots) -> Vec<Entry>;
}

/// Subdirectories of `parent` whose name starts with `prefix`
///
/// Missing or unreadable parents give an empty list.
pub(crate) fn dirs_with_prefix(parent: &Path, prefix: &str) -> Vec<PathBuf> {
    let Ok(read_dir) = std::fs::read_dir(parent) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = read_dir
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|e| e.file_name().to_string_lossy().starts_with(prefix))
        .map(|e| e.path())
        .collect();

    dirs.sort();
    dirs
}

/// Decode the HTML entities that show up in IDE settings files
///
/// Handles the five named XML entities and numeric references. Anything
/// else is left untouched.
pub(crate) fn html_decode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail.find(';').and_then(|semi| {
            let decoded = match &tail[1..semi] {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                entity => decode_numeric(entity),
            };
            decoded.map(|c| (c, semi + 1))
        });

        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_numeric(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}
