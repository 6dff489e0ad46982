// claude-launcher - start claude in whatever you were working on last
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use claude_launcher_lib::{
    core::{Aggregator, Entry, Launcher, OpenTarget, Searcher},
    platform::{AutoStart, TerminalDetector, TerminalKind},
    settings::{SettingsStore, ThemeMode},
    ui::{HotkeyChord, MenuItem, Palette, TrayMenu},
    LauncherError,
};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Pick a recent solution or project and start claude in it.
#[derive(Parser, Debug)]
#[command(name = "claude-launcher")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    claude-launcher list
    claude-launcher search api
    claude-launcher launch api --terminal powershell
    claude-launcher launch --each api web-shop
    claude-launcher pin C:\\src\\Shop\\Shop.sln
    claude-launcher folders add C:\\tools --name Tools
    claude-launcher config set-hotkey Ctrl+Alt+C
")]
struct Cli {
    /// Settings file to use instead of the per-user default.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the ranked recent list.
    List {
        /// Maximum entries to show.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Filter the recent list like the search popup does.
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Start a terminal running claude in the matching entry's folder.
    Launch {
        /// Search text or a path.
        #[arg(required = true)]
        target: Vec<String>,

        /// Terminal to use (wt, powershell, cmd).
        #[arg(short, long)]
        terminal: Option<TerminalKind>,

        /// Extra claude arguments for this launch only.
        #[arg(short, long, allow_hyphen_values = true)]
        args: Option<String>,

        /// Treat every target as its own entry and launch them all.
        #[arg(short, long)]
        each: bool,
    },

    /// Open the matching entry in Visual Studio, VS Code or Explorer.
    Open {
        #[arg(required = true)]
        target: Vec<String>,

        /// vs, code or explorer.
        #[arg(short, long)]
        with: OpenTarget,
    },

    /// Pin or unpin an entry.
    Pin {
        #[arg(required = true)]
        target: Vec<String>,
    },

    /// Show the launch history, most recent first.
    History,

    /// Manage custom folders.
    Folders {
        #[command(subcommand)]
        action: FolderAction,
    },

    /// Show or change settings.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Start at logon (Windows only).
    Autostart {
        #[command(subcommand)]
        action: AutostartAction,
    },

    /// List installed terminals.
    Terminals,

    /// Print the tray menu as it would currently appear.
    Menu,
}

#[derive(Subcommand, Debug)]
enum FolderAction {
    List,
    Add {
        path: PathBuf,
        /// Label to show instead of the folder name.
        #[arg(short, long)]
        name: Option<String>,
    },
    Remove {
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    SetTerminal { kind: TerminalKind },
    /// Default extra claude arguments ("" to clear).
    SetArgs {
        #[arg(allow_hyphen_values = true)]
        args: String,
    },
    SetHotkey { chord: String },
    SetTheme { mode: ThemeMode },
    /// Turn an IDE source on or off (vs, code, rider).
    Source { name: String, state: Toggle },
}

#[derive(Subcommand, Debug)]
enum AutostartAction {
    Status,
    On,
    Off,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        let message = match e.downcast_ref::<LauncherError>() {
            Some(err) => err.user_message(),
            None => format!("{:#}", e),
        };
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut store = match &cli.settings {
        Some(path) => SettingsStore::open(path).await,
        None => SettingsStore::open_default().await?,
    };
    debug!(path = %store.path().display(), "settings loaded");

    match cli.command {
        Command::List { limit, json } => handle_list(&store, limit, json),
        Command::Search { query } => handle_search(&store, &query.join(" ")),
        Command::Launch {
            target,
            terminal,
            args,
            each,
        } => {
            let targets = if each { target } else { vec![target.join(" ")] };
            handle_launch(&mut store, &targets, terminal, args).await
        }
        Command::Open { target, with } => handle_open(&store, &target.join(" "), with),
        Command::Pin { target } => handle_pin(&mut store, &target.join(" ")).await,
        Command::History => handle_history(&store),
        Command::Folders { action } => handle_folders(&mut store, action).await,
        Command::Config { action } => handle_config(&mut store, action).await,
        Command::Autostart { action } => handle_autostart(action),
        Command::Terminals => handle_terminals(&store),
        Command::Menu => handle_menu(&store),
    }
}

fn recent_entries(store: &SettingsStore) -> Result<Vec<Entry>> {
    let aggregator = Aggregator::from_env().context("Could not locate user profile folders")?;
    Ok(aggregator.recent(store.settings()))
}

/// An existing path wins; anything else is a search over the recent list
fn resolve_target(entries: &[Entry], target: &str) -> Result<Entry> {
    Searcher::new()
        .resolve(entries, target)
        .ok_or_else(|| LauncherError::EntryNotFound(target.to_string()).into())
}

fn print_entries(store: &SettingsStore, entries: &[Entry]) {
    println!("{}", "=".repeat(60));
    for (i, entry) in entries.iter().enumerate() {
        let marker = if entry.is_pinned(store.settings()) { "*" } else { " " };
        let branch = entry
            .git_branch()
            .map(|b| {
                let dirty = if entry.has_uncommitted_changes() { "*" } else { "" };
                format!("  [{}{}]", b, dirty)
            })
            .unwrap_or_default();

        println!(
            "{:3}. {} {:<40} {:<6} {}{}",
            i + 1,
            marker,
            entry.display_name,
            entry.origin.label(),
            entry.last_modified_text(),
            branch
        );
        println!("        {}", entry.path.display());
    }
    println!("{}", "=".repeat(60));
}

fn handle_list(store: &SettingsStore, limit: Option<usize>, json: bool) -> Result<()> {
    let mut entries = recent_entries(store)?;
    if let Some(limit) = limit {
        entries.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No recent solutions found.");
    } else {
        println!("\nRecent solutions:");
        print_entries(store, &entries);
    }

    Ok(())
}

fn handle_search(store: &SettingsStore, query: &str) -> Result<()> {
    let entries = recent_entries(store)?;
    let results: Vec<Entry> = Searcher::new()
        .filter(&entries, query)
        .into_iter()
        .map(|r| r.entry)
        .collect();

    if results.is_empty() {
        println!("Nothing matches '{}'", query);
    } else {
        println!("\nFound {} match(es) for '{}':", results.len(), query);
        print_entries(store, &results);
    }

    Ok(())
}

async fn handle_launch(
    store: &mut SettingsStore,
    targets: &[String],
    terminal: Option<TerminalKind>,
    args: Option<String>,
) -> Result<()> {
    let entries = recent_entries(store)?;
    let selected = targets
        .iter()
        .map(|target| resolve_target(&entries, target))
        .collect::<Result<Vec<Entry>>>()?;

    let preferred = terminal.unwrap_or(store.settings().terminal);
    let chosen = TerminalDetector::from_env().best_available(preferred);
    if chosen != preferred {
        warn!(preferred = %preferred, using = %chosen, "preferred terminal not found");
    }

    let claude_args = args.unwrap_or_else(|| store.settings().claude_arguments.clone());
    let results = Launcher::new()
        .launch_all(&selected, chosen, &claude_args, store)
        .await;

    let mut failures = 0;
    for (entry, result) in selected.iter().zip(results) {
        match result {
            Ok(command) => println!(
                "Launched claude in {} ({} {})",
                command.working_dir.display(),
                command.program,
                command.command_line
            ),
            Err(e) if selected.len() == 1 => return Err(e.into()),
            Err(e) => {
                failures += 1;
                eprintln!("✗ {}: {}", entry.display_name, e.user_message());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} launches failed", failures, selected.len());
    }
    Ok(())
}

fn handle_open(store: &SettingsStore, target: &str, with: OpenTarget) -> Result<()> {
    let entries = recent_entries(store)?;
    let entry = resolve_target(&entries, target)?;
    let command = Launcher::new().open(&entry, with)?;

    println!("Opened {} with {}", entry.path.display(), command.program);
    Ok(())
}

async fn handle_pin(store: &mut SettingsStore, target: &str) -> Result<()> {
    let entries = recent_entries(store)?;
    let entry = resolve_target(&entries, target)?;

    if store.toggle_pin(&entry.path.to_string_lossy()).await {
        println!("Pinned {}", entry.display_name);
    } else {
        println!("Unpinned {}", entry.display_name);
    }
    Ok(())
}

fn handle_history(store: &SettingsStore) -> Result<()> {
    let history = &store.settings().launch_history;

    if history.is_empty() {
        println!("Nothing launched yet.");
        return Ok(());
    }

    println!("\nLaunch history (max {}):", store.settings().max_history_items);
    for (i, path) in history.iter().enumerate() {
        println!("{:3}. {}", i + 1, path);
    }
    Ok(())
}

async fn handle_folders(store: &mut SettingsStore, action: FolderAction) -> Result<()> {
    match action {
        FolderAction::List => {
            let folders = &store.settings().custom_folders;
            if folders.is_empty() {
                println!("No custom folders.");
            }
            for folder in folders {
                let status = if Path::new(&folder.path).is_dir() { " " } else { "!" };
                if folder.display_name.is_empty() {
                    println!("{} {}", status, folder.path);
                } else {
                    println!("{} {} ({})", status, folder.path, folder.display_name);
                }
            }
        }
        FolderAction::Add { path, name } => {
            if !path.is_dir() {
                return Err(LauncherError::DirectoryNotFound(path).into());
            }
            let absolute = std::path::absolute(&path)?;
            let added = store
                .add_custom_folder(&absolute.to_string_lossy(), name.as_deref())
                .await;
            if added {
                println!("Added {}", absolute.display());
            } else {
                println!("{} is already a custom folder", absolute.display());
            }
        }
        FolderAction::Remove { path } => {
            let path_str = path.to_string_lossy();
            let removed = store.remove_custom_folder(&path_str).await
                || match std::path::absolute(&path) {
                    Ok(abs) => store.remove_custom_folder(&abs.to_string_lossy()).await,
                    Err(_) => false,
                };
            if removed {
                println!("Removed {}", path.display());
            } else {
                println!("{} is not a custom folder", path.display());
            }
        }
    }
    Ok(())
}

async fn handle_config(store: &mut SettingsStore, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("Settings file: {}", store.path().display());
            println!("{}", serde_json::to_string_pretty(store.settings())?);
        }
        ConfigAction::SetTerminal { kind } => {
            store.update(|s| s.terminal = kind).await;
            println!("Terminal set to {}", kind);
        }
        ConfigAction::SetArgs { args } => {
            let trimmed = args.trim().to_string();
            store.update(|s| s.claude_arguments = trimmed.clone()).await;
            println!("Default claude arguments: '{}'", trimmed);
        }
        ConfigAction::SetHotkey { chord } => {
            let chord = HotkeyChord::parse(&chord)?;
            store.update(|s| chord.apply_to(s)).await;
            println!("Hotkey set to {}", chord);
        }
        ConfigAction::SetTheme { mode } => {
            store.update(|s| s.theme = mode).await;
            let palette = Palette::for_mode(mode);
            println!(
                "Theme set to {} (background {}, text {})",
                mode, palette.background, palette.primary_text
            );
        }
        ConfigAction::Source { name, state } => {
            let enabled = matches!(state, Toggle::On);
            match name.to_ascii_lowercase().as_str() {
                "vs" | "visualstudio" => store.update(|s| s.include_visual_studio = enabled).await,
                "code" | "vscode" => store.update(|s| s.include_vs_code = enabled).await,
                "rider" => store.update(|s| s.include_rider = enabled).await,
                other => {
                    return Err(LauncherError::Config(format!(
                        "unknown source '{}' (expected vs, code or rider)",
                        other
                    ))
                    .into())
                }
            }
            println!("Source {} {}", name, if enabled { "enabled" } else { "disabled" });
        }
    }
    Ok(())
}

fn handle_autostart(action: AutostartAction) -> Result<()> {
    let autostart = AutoStart::default();

    match action {
        AutostartAction::Status => {
            let state = if autostart.is_enabled()? { "enabled" } else { "disabled" };
            println!("Autostart is {}", state);
        }
        AutostartAction::On => {
            autostart.set_enabled(true)?;
            println!("Autostart enabled");
        }
        AutostartAction::Off => {
            autostart.set_enabled(false)?;
            println!("Autostart disabled");
        }
    }
    Ok(())
}

fn handle_terminals(store: &SettingsStore) -> Result<()> {
    let detector = TerminalDetector::from_env();
    let configured = store.settings().terminal;

    println!("\nTerminals:");
    for kind in TerminalKind::ALL {
        let status = if detector.is_available(kind) {
            "✓ Installed"
        } else {
            "✗ Not found"
        };
        let current = if kind == configured { " (configured)" } else { "" };
        println!("  {:<12} {}{}", format!("{}:", kind), status, current);
    }
    println!("\nWill use: {}", detector.best_available(configured));

    Ok(())
}

fn handle_menu(store: &SettingsStore) -> Result<()> {
    let entries = recent_entries(store)?;
    let menu = TrayMenu::build(&entries, store.settings());

    for item in &menu.items {
        match item {
            MenuItem::Separator => println!("  ----------------"),
            MenuItem::Item { label, enabled, .. } => {
                if *enabled {
                    println!("  {}", label);
                } else {
                    println!("  ({})", label);
                }
            }
        }
    }
    Ok(())
}
