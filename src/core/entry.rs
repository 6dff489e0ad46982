/// Recent entry model
///
/// One solution, workspace or folder discovered by a source, plus the
/// details the popup computes on demand (pin state, branch, age).

use crate::settings::UserSettings;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Seconds between 1601-01-01 (FILETIME epoch) and 1970-01-01
const FILETIME_UNIX_OFFSET_SECS: i64 = 11_644_473_600;

/// FILETIME ticks per second (100ns resolution)
const FILETIME_TICKS_PER_SEC: i64 = 10_000_000;

/// Where an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Origin {
    VisualStudio,
    VsCode,
    Rider,
    Custom,
}

impl Origin {
    /// Short tag shown next to the entry
    pub fn label(&self) -> &'static str {
        match self {
            Origin::VisualStudio => "VS",
            Origin::VsCode => "Code",
            Origin::Rider => "Rider",
            Origin::Custom => "Folder",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A recent solution or project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub path: PathBuf,
    pub display_name: String,
    pub last_accessed: DateTime<Utc>,
    pub origin: Origin,
}

impl Entry {
    pub fn new<P: Into<PathBuf>>(
        path: P,
        display_name: impl Into<String>,
        last_accessed: DateTime<Utc>,
        origin: Origin,
    ) -> Self {
        Self {
            path: path.into(),
            display_name: display_name.into(),
            last_accessed,
            origin,
        }
    }

    /// Entry for a path the user named directly
    ///
    /// Folders are labelled by name, files by the solution display rule.
    /// Recency is the path's modification time, or now if unreadable.
    pub fn for_path<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let display_name = if path.is_dir() {
            folder_name(&path)
        } else {
            display_name_for(&path)
        };
        let last_accessed = modified_time(&path).unwrap_or_else(Utc::now);
        Self::new(path, display_name, last_accessed, Origin::Custom)
    }

    /// Dedup key for this entry
    pub fn key(&self) -> String {
        canonical_key(&self.path)
    }

    /// Folder a terminal should open in
    ///
    /// Folders are used as-is; files (solutions, workspace files) resolve
    /// to their parent.
    pub fn directory(&self) -> PathBuf {
        if self.path.is_dir() {
            return self.path.clone();
        }

        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => self.path.clone(),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn is_pinned(&self, settings: &UserSettings) -> bool {
        settings.is_pinned(&self.path.to_string_lossy())
    }

    pub fn history_index(&self, settings: &UserSettings) -> Option<usize> {
        settings.history_index(&self.path.to_string_lossy())
    }

    /// Current branch of the repository containing this entry
    ///
    /// Detached heads give the short commit hash. `None` outside a repo.
    pub fn git_branch(&self) -> Option<String> {
        let repo = git2::Repository::discover(self.directory()).ok()?;

        let branch = match repo.head() {
            Ok(head) if head.is_branch() => head.shorthand().map(|s| s.to_string()),
            Ok(head) => head
                .target()
                .map(|oid| oid.to_string().chars().take(7).collect()),
            // Fresh repo with no commits yet: HEAD still names a branch
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => repo
                .find_reference("HEAD")
                .ok()?
                .symbolic_target()
                .map(|target| target.trim_start_matches("refs/heads/").to_string()),
            Err(_) => None,
        };
        branch
    }

    /// Whether the enclosing repository has staged, unstaged or untracked
    /// changes. `false` outside a repository or when git can't tell.
    pub fn has_uncommitted_changes(&self) -> bool {
        let Ok(repo) = git2::Repository::discover(self.directory()) else {
            return false;
        };
        if repo.is_bare() {
            return false;
        }

        let mut options = git2::StatusOptions::new();
        options.include_untracked(true).include_ignored(false);

        let dirty = match repo.statuses(Some(&mut options)) {
            Ok(statuses) => statuses.iter().any(|s| s.status() != git2::Status::CURRENT),
            Err(_) => false,
        };
        dirty
    }

    /// Age label like "5m ago", based on the path's modification time
    pub fn last_modified_text(&self) -> String {
        match modified_time(&self.path) {
            Some(modified) => relative_time_text(modified, Utc::now()),
            None => "Not found".to_string(),
        }
    }
}

/// Case-insensitive comparison key for a path
pub fn canonical_key<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().to_lowercase()
}

/// Label for a solution-like file
///
/// Uses the file stem, plus the parent folder in parentheses when the
/// folder name says something the stem doesn't.
pub fn display_name_for<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    let stem = match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => stem,
        None => return path.to_string_lossy().to_string(),
    };

    let parent = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if !parent.is_empty() && !parent.eq_ignore_ascii_case(stem) {
        format!("{} ({})", stem, parent)
    } else {
        stem.to_string()
    }
}

/// Last component of a path, or the whole path when there is none
pub fn folder_name<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Modification time of a file or directory
pub fn modified_time<P: AsRef<Path>>(path: P) -> Option<DateTime<Utc>> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(|t: SystemTime| DateTime::<Utc>::from(t))
}

/// Convert a Windows FILETIME (100ns ticks since 1601) to UTC
pub fn from_filetime(ticks: i64) -> Option<DateTime<Utc>> {
    let secs = ticks.div_euclid(FILETIME_TICKS_PER_SEC) - FILETIME_UNIX_OFFSET_SECS;
    let nanos = (ticks.rem_euclid(FILETIME_TICKS_PER_SEC) * 100) as u32;
    DateTime::from_timestamp(secs, nanos)
}

/// Human-friendly age of `then` relative to `now`
pub fn relative_time_text(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - then;

    if diff.num_minutes() < 1 {
        "Just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 7 {
        format!("{}d ago", diff.num_days())
    } else {
        then.with_timezone(&Local).format("%b %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_display_name_adds_parent() {
        assert_eq!(display_name_for("/src/Backend/Api.sln"), "Api (Backend)");
    }

    #[test]
    fn test_display_name_same_as_parent() {
        assert_eq!(display_name_for("/src/Shop/shop.slnx"), "shop");
    }

    #[test]
    fn test_canonical_key_ignores_case() {
        assert_eq!(canonical_key("/Src/App.SLN"), canonical_key("/src/app.sln"));
    }

    #[test]
    fn test_from_filetime() {
        // 2024-01-01T00:00:00Z
        let ticks = (1_704_067_200 + FILETIME_UNIX_OFFSET_SECS) * FILETIME_TICKS_PER_SEC;
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(from_filetime(ticks), Some(expected));
    }

    #[test]
    fn test_relative_time_text() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(relative_time_text(now - Duration::seconds(20), now), "Just now");
        assert_eq!(relative_time_text(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative_time_text(now - Duration::hours(3), now), "3h ago");
        assert_eq!(relative_time_text(now - Duration::days(2), now), "2d ago");
        assert!(!relative_time_text(now - Duration::days(30), now).ends_with("ago"));
    }

    #[test]
    fn test_directory_of_solution_and_folder() {
        let temp = TempDir::new().unwrap();
        let sln = temp.path().join("App.sln");
        fs::write(&sln, "").unwrap();

        let file_entry = Entry::new(&sln, "App", Utc::now(), Origin::VisualStudio);
        assert_eq!(file_entry.directory(), temp.path());

        let folder_entry = Entry::new(temp.path(), "tmp", Utc::now(), Origin::VsCode);
        assert_eq!(folder_entry.directory(), temp.path());
    }

    #[test]
    fn test_last_modified_text_missing_path() {
        let entry = Entry::new("/definitely/not/here", "x", Utc::now(), Origin::Custom);
        assert!(!entry.exists());
        assert_eq!(entry.last_modified_text(), "Not found");
    }

    #[test]
    fn test_git_branch() {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        fs::write(temp.path().join("App.sln"), "").unwrap();

        let sig = git2::Signature::now("dev", "dev@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let commit_id = repo
            .commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
            .unwrap();
        let commit = repo.find_commit(commit_id).unwrap();
        repo.branch("feature", &commit, false).unwrap();
        repo.set_head("refs/heads/feature").unwrap();

        let entry = Entry::new(
            temp.path().join("App.sln"),
            "App",
            Utc::now(),
            Origin::VisualStudio,
        );
        assert_eq!(entry.git_branch().as_deref(), Some("feature"));

        repo.set_head_detached(commit_id).unwrap();
        let short = entry.git_branch().unwrap();
        assert_eq!(short.len(), 7);
        assert!(commit_id.to_string().starts_with(&short));
    }

    #[test]
    fn test_has_uncommitted_changes() {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        fs::write(temp.path().join("App.sln"), "v1").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("App.sln")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git2::Signature::now("dev", "dev@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
            .unwrap();

        let entry = Entry::new(
            temp.path().join("App.sln"),
            "App",
            Utc::now(),
            Origin::VisualStudio,
        );
        assert!(!entry.has_uncommitted_changes());

        fs::write(temp.path().join("App.sln"), "v2").unwrap();
        assert!(entry.has_uncommitted_changes());

        fs::write(temp.path().join("App.sln"), "v1").unwrap();
        fs::write(temp.path().join("notes.txt"), "new").unwrap();
        assert!(entry.has_uncommitted_changes());
    }

    #[test]
    fn test_for_path() {
        let temp = TempDir::new().unwrap();
        let sln = temp.path().join("Api.sln");
        fs::write(&sln, "").unwrap();

        let folder = Entry::for_path(temp.path());
        assert_eq!(folder.origin, Origin::Custom);
        assert_eq!(folder.display_name, folder_name(temp.path()));

        let file = Entry::for_path(&sln);
        assert_eq!(file.display_name, display_name_for(&sln));
    }

    #[test]
    fn test_git_branch_outside_repo() {
        let temp = TempDir::new().unwrap();
        let entry = Entry::new(temp.path(), "tmp", Utc::now(), Origin::Custom);
        // Temp dirs normally aren't inside a repository
        if git2::Repository::discover(temp.path()).is_err() {
            assert!(entry.git_branch().is_none());
            assert!(!entry.has_uncommitted_changes());
        }
    }
}
