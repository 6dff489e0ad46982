/// Terminal detection logic
///
/// Knows the supported terminals, how to build their command lines, and
/// which of them are installed.

use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Supported terminals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TerminalKind {
    #[default]
    WindowsTerminal,
    PowerShell,
    Cmd,
}

impl TerminalKind {
    pub const ALL: [TerminalKind; 3] = [
        TerminalKind::WindowsTerminal,
        TerminalKind::PowerShell,
        TerminalKind::Cmd,
    ];

    /// Get the terminal name as a string
    pub fn name(&self) -> &'static str {
        match self {
            TerminalKind::WindowsTerminal => "wt",
            TerminalKind::PowerShell => "powershell",
            TerminalKind::Cmd => "cmd",
        }
    }

    /// Executable to start
    pub fn binary(&self) -> &'static str {
        match self {
            TerminalKind::WindowsTerminal => "wt.exe",
            TerminalKind::PowerShell => "powershell.exe",
            TerminalKind::Cmd => "cmd.exe",
        }
    }

    /// Arguments as separate tokens
    ///
    /// `claude_args` is appended after a space when it isn't blank.
    pub fn args(&self, directory: &Path, claude_args: &str) -> Vec<String> {
        let dir = directory.display();
        let claude = claude_invocation(claude_args);

        match self {
            TerminalKind::WindowsTerminal => vec![
                "-d".to_string(),
                dir.to_string(),
                "cmd".to_string(),
                "/c".to_string(),
                claude,
            ],
            TerminalKind::PowerShell => vec![
                "-NoExit".to_string(),
                "-Command".to_string(),
                format!("cd '{}'; {}", dir, claude),
            ],
            TerminalKind::Cmd => vec![
                "/k".to_string(),
                format!("cd /d \"{}\" && {}", dir, claude),
            ],
        }
    }

    /// The exact argument string handed to the terminal
    ///
    /// Windows programs parse their own command line, so this is passed
    /// through unescaped.
    pub fn command_line(&self, directory: &Path, claude_args: &str) -> String {
        let dir = directory.display();
        let claude = claude_invocation(claude_args);

        match self {
            TerminalKind::WindowsTerminal => format!("-d \"{}\" cmd /c \"{}\"", dir, claude),
            TerminalKind::PowerShell => {
                format!("-NoExit -Command \"cd '{}'; {}\"", dir, claude)
            }
            TerminalKind::Cmd => format!("/k \"cd /d \"{}\" && {}\"", dir, claude),
        }
    }
}

impl std::fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for TerminalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wt" | "windowsterminal" | "windows-terminal" => Ok(TerminalKind::WindowsTerminal),
            "powershell" | "pwsh" | "ps" => Ok(TerminalKind::PowerShell),
            "cmd" => Ok(TerminalKind::Cmd),
            other => Err(format!(
                "unknown terminal '{}' (expected wt, powershell or cmd)",
                other
            )),
        }
    }
}

/// `claude` plus optional extra arguments, passed through verbatim
fn claude_invocation(claude_args: &str) -> String {
    if claude_args.trim().is_empty() {
        "claude".to_string()
    } else {
        format!("claude {}", claude_args)
    }
}

/// Terminal detector
///
/// Looks terminals up on PATH; Windows Terminal is also found in its
/// app-execution-alias folder, which isn't always on PATH.
pub struct TerminalDetector {
    path_var: Option<OsString>,
    local_app_data: Option<PathBuf>,
}

impl TerminalDetector {
    /// Detector over the current environment
    pub fn from_env() -> Self {
        Self {
            path_var: env::var_os("PATH"),
            local_app_data: dirs::data_local_dir(),
        }
    }

    /// Detector over an explicit PATH value and local app data folder
    pub fn new(path_var: Option<OsString>, local_app_data: Option<PathBuf>) -> Self {
        Self {
            path_var,
            local_app_data,
        }
    }

    /// Check whether a terminal can be started
    pub fn is_available(&self, kind: TerminalKind) -> bool {
        if self.on_path(kind.binary()) {
            return true;
        }

        if kind == TerminalKind::WindowsTerminal {
            if let Some(local) = &self.local_app_data {
                let alias = local.join("Microsoft").join("WindowsApps").join("wt.exe");
                if alias.is_file() {
                    return true;
                }
            }
        }

        #[cfg(windows)]
        if Self::where_finds(kind.binary()) {
            return true;
        }

        false
    }

    /// All installed terminals, in preference order
    pub fn available(&self) -> Vec<TerminalKind> {
        TerminalKind::ALL
            .iter()
            .copied()
            .filter(|k| self.is_available(*k))
            .collect()
    }

    /// First installed terminal, falling back to cmd
    pub fn default_terminal(&self) -> TerminalKind {
        if self.is_available(TerminalKind::WindowsTerminal) {
            TerminalKind::WindowsTerminal
        } else if self.is_available(TerminalKind::PowerShell) {
            TerminalKind::PowerShell
        } else {
            TerminalKind::Cmd
        }
    }

    /// The preferred terminal if installed, otherwise the default
    pub fn best_available(&self, preferred: TerminalKind) -> TerminalKind {
        if self.is_available(preferred) {
            preferred
        } else {
            self.default_terminal()
        }
    }

    fn on_path(&self, binary: &str) -> bool {
        self.path_var
            .as_ref()
            .map(|path| env::split_paths(path).any(|dir| dir.join(binary).is_file()))
            .unwrap_or(false)
    }

    /// Ask `where.exe`, which also knows about App Paths registrations
    #[cfg(windows)]
    fn where_finds(binary: &str) -> bool {
        use std::process::Command;

        Command::new("where.exe")
            .arg(binary)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}
