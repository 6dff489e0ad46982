/// Starts a terminal running claude in an entry's folder
///
/// Also handles the "open in IDE / Explorer" side actions. Nothing here is
/// retried: a failed start is reported and the history stays as it was.

use crate::core::entry::Entry;
use crate::error::{LauncherError, Result};
use crate::platform::TerminalKind;
use crate::settings::SettingsStore;
use crate::sources::visual_studio::is_solution_path;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A fully built process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    /// Raw argument string, used as-is on Windows
    pub command_line: String,
    /// Same arguments as tokens, used elsewhere
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl LaunchCommand {
    /// Terminal + claude in `directory`
    pub fn claude(terminal: TerminalKind, directory: &Path, claude_args: &str) -> Self {
        Self {
            program: terminal.binary().to_string(),
            command_line: terminal.command_line(directory, claude_args),
            args: terminal.args(directory, claude_args),
            working_dir: directory.to_path_buf(),
        }
    }

    /// Open an entry with something other than claude
    pub fn open(target: OpenTarget, entry: &Entry) -> Self {
        let path = entry.path.display().to_string();
        let dir = entry.directory();
        let dir_str = dir.display().to_string();

        let (program, command_line, args) = match target {
            OpenTarget::VisualStudio if is_solution_path(&path) => (
                "cmd.exe",
                format!("/c start \"\" \"{}\"", path),
                vec!["/c".to_string(), "start".to_string(), String::new(), path.clone()],
            ),
            OpenTarget::VisualStudio => (
                "devenv.exe",
                format!("\"{}\"", dir_str),
                vec![dir_str.clone()],
            ),
            OpenTarget::VsCode => (
                "cmd.exe",
                format!("/c code \"{}\"", dir_str),
                vec!["/c".to_string(), "code".to_string(), dir_str.clone()],
            ),
            OpenTarget::Explorer => (
                "explorer.exe",
                format!("/select,\"{}\"", path),
                vec![format!("/select,{}", path)],
            ),
        };

        Self {
            program: program.to_string(),
            command_line,
            args,
            working_dir: dir,
        }
    }
}

/// Secondary "open with" targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTarget {
    VisualStudio,
    VsCode,
    Explorer,
}

impl std::str::FromStr for OpenTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vs" | "visualstudio" | "visual-studio" => Ok(OpenTarget::VisualStudio),
            "code" | "vscode" => Ok(OpenTarget::VsCode),
            "explorer" => Ok(OpenTarget::Explorer),
            other => Err(format!(
                "unknown target '{}' (expected vs, code or explorer)",
                other
            )),
        }
    }
}

/// Something that can start a process
pub trait Spawner {
    fn spawn(&self, command: &LaunchCommand) -> std::io::Result<()>;
}

/// Starts real processes and doesn't wait for them
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn spawn(&self, command: &LaunchCommand) -> std::io::Result<()> {
        use std::process::Command;

        let mut process = Command::new(&command.program);
        process.current_dir(&command.working_dir);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            process.raw_arg(&command.command_line);
        }

        #[cfg(not(windows))]
        process.args(&command.args);

        process.spawn().map(|_child| ())
    }
}

/// Launches claude sessions and records them in history
pub struct Launcher<S: Spawner = SystemSpawner> {
    spawner: S,
}

impl Launcher<SystemSpawner> {
    pub fn new() -> Self {
        Self {
            spawner: SystemSpawner,
        }
    }
}

impl Default for Launcher<SystemSpawner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Spawner> Launcher<S> {
    pub fn with_spawner(spawner: S) -> Self {
        Self { spawner }
    }

    /// Start `terminal` in the entry's folder running claude
    ///
    /// On success the entry's path goes to the front of the launch history
    /// and settings are saved.
    pub async fn launch(
        &self,
        entry: &Entry,
        terminal: TerminalKind,
        claude_args: &str,
        store: &mut SettingsStore,
    ) -> Result<LaunchCommand> {
        let directory = entry.directory();
        if !directory.is_dir() {
            return Err(LauncherError::DirectoryNotFound(directory));
        }

        let command = LaunchCommand::claude(terminal, &directory, claude_args);
        self.start(&command)?;

        info!(path = %entry.path.display(), terminal = %terminal, "launched claude");
        store.record_launch(&entry.path.to_string_lossy()).await;

        Ok(command)
    }

    /// Launch several entries one after another
    ///
    /// Each entry gets its own terminal and its own history update, so the
    /// last successful one ends up first in history. A failure doesn't stop
    /// the rest; results come back in input order.
    pub async fn launch_all(
        &self,
        entries: &[Entry],
        terminal: TerminalKind,
        claude_args: &str,
        store: &mut SettingsStore,
    ) -> Vec<Result<LaunchCommand>> {
        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            results.push(self.launch(entry, terminal, claude_args, store).await);
        }
        results
    }

    /// Open the entry in an IDE or Explorer; history is untouched
    pub fn open(&self, entry: &Entry, target: OpenTarget) -> Result<LaunchCommand> {
        if !entry.exists() {
            return Err(LauncherError::DirectoryNotFound(entry.path.clone()));
        }

        let command = LaunchCommand::open(target, entry);
        self.start(&command)?;
        Ok(command)
    }

    fn start(&self, command: &LaunchCommand) -> Result<()> {
        self.spawner.spawn(command).map_err(|e| {
            warn!(program = %command.program, error = %e, "failed to start process");
            LauncherError::LaunchFailed {
                terminal: command.program.clone(),
                message: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::Origin;
    use chrono::Utc;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingSpawner {
        started: RefCell<Vec<LaunchCommand>>,
        fail: bool,
    }

    impl Spawner for &RecordingSpawner {
        fn spawn(&self, command: &LaunchCommand) -> std::io::Result<()> {
            if self.fail {
                return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "wt.exe missing"));
            }
            self.started.borrow_mut().push(command.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_launch_records_history() {
        let temp = TempDir::new().unwrap();
        let sln = temp.path().join("App.sln");
        std::fs::write(&sln, "").unwrap();
        let entry = Entry::new(&sln, "App", Utc::now(), Origin::VisualStudio);

        let mut store = SettingsStore::open(temp.path().join("settings.json")).await;
        let spawner = RecordingSpawner::default();
        let launcher = Launcher::with_spawner(&spawner);

        let command = launcher
            .launch(&entry, TerminalKind::Cmd, "--continue", &mut store)
            .await
            .unwrap();

        assert_eq!(command.program, "cmd.exe");
        assert_eq!(command.working_dir, temp.path());
        assert!(command.command_line.ends_with("&& claude --continue\""));
        assert_eq!(spawner.started.borrow().len(), 1);
        assert_eq!(store.settings().history_index(&sln.to_string_lossy()), Some(0));
    }

    #[tokio::test]
    async fn test_launch_missing_directory() {
        let temp = TempDir::new().unwrap();
        let entry = Entry::new(
            temp.path().join("gone").join("App.sln"),
            "App",
            Utc::now(),
            Origin::VisualStudio,
        );

        let mut store = SettingsStore::open(temp.path().join("settings.json")).await;
        let spawner = RecordingSpawner::default();
        let launcher = Launcher::with_spawner(&spawner);

        let result = launcher
            .launch(&entry, TerminalKind::WindowsTerminal, "", &mut store)
            .await;

        assert!(matches!(result, Err(LauncherError::DirectoryNotFound(_))));
        assert!(spawner.started.borrow().is_empty());
        assert!(store.settings().launch_history.is_empty());
    }

    #[tokio::test]
    async fn test_spawn_failure_leaves_history_alone() {
        let temp = TempDir::new().unwrap();
        let entry = Entry::new(temp.path(), "tmp", Utc::now(), Origin::Custom);

        let mut store = SettingsStore::open(temp.path().join("settings.json")).await;
        let spawner = RecordingSpawner {
            fail: true,
            ..Default::default()
        };
        let launcher = Launcher::with_spawner(&spawner);

        let result = launcher
            .launch(&entry, TerminalKind::WindowsTerminal, "", &mut store)
            .await;

        match result {
            Err(LauncherError::LaunchFailed { terminal, .. }) => assert_eq!(terminal, "wt.exe"),
            other => panic!("Expected LaunchFailed, got {:?}", other),
        }
        assert!(store.settings().launch_history.is_empty());
    }

    #[tokio::test]
    async fn test_launch_all_records_each() {
        let temp = TempDir::new().unwrap();
        let api = temp.path().join("api");
        let web = temp.path().join("web");
        std::fs::create_dir(&api).unwrap();
        std::fs::create_dir(&web).unwrap();

        let entries = vec![
            Entry::new(&api, "api", Utc::now(), Origin::Custom),
            Entry::new(temp.path().join("gone").join("Gone.sln"), "Gone", Utc::now(), Origin::VisualStudio),
            Entry::new(&web, "web", Utc::now(), Origin::Custom),
        ];

        let mut store = SettingsStore::open(temp.path().join("settings.json")).await;
        let spawner = RecordingSpawner::default();
        let launcher = Launcher::with_spawner(&spawner);

        let results = launcher
            .launch_all(&entries, TerminalKind::Cmd, "", &mut store)
            .await;

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(LauncherError::DirectoryNotFound(_))));
        assert!(results[2].is_ok());
        assert_eq!(spawner.started.borrow().len(), 2);

        let history = &store.settings().launch_history;
        assert_eq!(
            history,
            &vec![web.to_string_lossy().to_string(), api.to_string_lossy().to_string()]
        );
    }

    #[test]
    fn test_open_commands() {
        let temp = TempDir::new().unwrap();
        let sln = temp.path().join("App.sln");
        std::fs::write(&sln, "").unwrap();
        let entry = Entry::new(&sln, "App", Utc::now(), Origin::VisualStudio);

        let vs = LaunchCommand::open(OpenTarget::VisualStudio, &entry);
        assert_eq!(vs.program, "cmd.exe");
        assert!(vs.command_line.starts_with("/c start \"\""));

        let folder = Entry::new(temp.path(), "tmp", Utc::now(), Origin::Custom);
        let vs_folder = LaunchCommand::open(OpenTarget::VisualStudio, &folder);
        assert_eq!(vs_folder.program, "devenv.exe");

        let explorer = LaunchCommand::open(OpenTarget::Explorer, &entry);
        assert_eq!(explorer.program, "explorer.exe");
        assert!(explorer.command_line.starts_with("/select,\""));
    }

    #[test]
    fn test_open_target_from_str() {
        assert_eq!("code".parse::<OpenTarget>(), Ok(OpenTarget::VsCode));
        assert_eq!("VS".parse::<OpenTarget>(), Ok(OpenTarget::VisualStudio));
        assert!("vim".parse::<OpenTarget>().is_err());
    }
}
