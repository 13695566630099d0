mod app;
mod config;
mod domain;
mod error;
mod input;
mod persistence;
mod ticker;
mod ui;

use anyhow::{bail, Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{filter_history, format_timestamp, Clock, CommitOutcome, Lifecycle, SystemClock};
use persistence::{
    config_file, ensure_data_dir, get_data_dir, init_local_data_dir, log_file, serialize_history, DocumentStore,
    HistoryStore, LocalStore,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter
const LOG_ENV: &str = "THOUGHTS_LOG";

#[derive(Parser)]
#[command(name = "thoughts")]
#[command(about = "A quiet terminal notebook for short thoughts that save themselves", long_about = None)]
struct Cli {
    /// Data directory to use instead of the discovered one
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Keep thoughts in a per-user document instead of the shared history file
    #[arg(long, global = true)]
    user: Option<String>,

    /// Override the idle autosave threshold in seconds
    #[arg(long, global = true)]
    stale_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .thoughts directory in the current directory
    Init,
    /// Print saved thoughts, newest first
    List {
        /// Only show thoughts containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Save a thought without opening the editor
    Add {
        /// Text of the thought
        text: String,
    },
    /// Delete all saved thoughts
    Purge {
        /// Confirm the purge
        #[arg(long)]
        yes: bool,
    },
    /// Write the history as JSON
    Export {
        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_stderr_logging();
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            let dir = init_local_data_dir(&cwd)?;
            println!("Initialized thoughts directory: {}", dir.display());
            println!();
            println!("Run 'thoughts' from here to keep notes in this directory.");
            Ok(())
        }
        Some(command) => {
            init_stderr_logging();
            let dir = prepare_dir(cli.dir.as_deref())?;
            let config = load_config(&dir, cli.stale_secs)?;
            let store = open_store(&dir, cli.user.as_deref())?;
            run_command(command, store.as_ref(), &config)
        }
        None => {
            let dir = prepare_dir(cli.dir.as_deref())?;
            init_file_logging(&dir)?;
            let config = load_config(&dir, cli.stale_secs)?;
            let store = open_store(&dir, cli.user.as_deref())?;
            run_tui(store, config)
        }
    }
}

fn prepare_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = get_data_dir(override_dir)?;
    ensure_data_dir(&dir)?;
    Ok(dir)
}

/// config.json with command-line overrides applied
fn load_config(dir: &Path, stale_secs: Option<u64>) -> Result<Config> {
    let mut config = Config::load(config_file(dir))?;
    if let Some(secs) = stale_secs {
        config.stale_threshold_secs = secs;
    }
    Ok(config)
}

fn open_store(dir: &Path, user: Option<&str>) -> Result<Box<dyn HistoryStore>> {
    match user {
        Some(user_id) => Ok(Box::new(DocumentStore::new(dir, user_id)?)),
        None => Ok(Box::new(LocalStore::new(dir))),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The TUI owns the terminal, so logs go to a file in the data directory
fn init_file_logging(dir: &Path) -> Result<()> {
    let path = log_file(dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter())
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

fn run_command(command: Commands, store: &dyn HistoryStore, config: &Config) -> Result<()> {
    match command {
        Commands::Init => Ok(()),
        Commands::List { search } => {
            let history = store.load()?;
            let term = search.unwrap_or_default();
            let entries = filter_history(history.as_slice(), &term);
            if entries.is_empty() {
                println!("No thoughts found.");
            }
            for entry in entries {
                println!("{}  {}", format_timestamp(entry.created_at), entry.text());
            }
            Ok(())
        }
        Commands::Add { text } => {
            let now = SystemClock.now_millis();
            let mut lifecycle = Lifecycle::new(
                store.load()?,
                config.stale_threshold_ms(),
                config.new_draft_policy,
                now,
            );
            lifecycle.begin_draft(now);
            lifecycle.edit_draft(now, text);
            let CommitOutcome::Committed(entry) = lifecycle.commit(now) else {
                bail!("Refusing to save a blank thought");
            };
            store.record_commit(lifecycle.history(), &entry)?;
            info!(store = %store.describe(), "thought added");
            println!("Saved. {} thoughts in total.", lifecycle.history().len());
            Ok(())
        }
        Commands::Purge { yes } => {
            if !yes {
                bail!("Purging deletes every saved thought; pass --yes to confirm");
            }
            store.purge()?;
            println!("History purged.");
            Ok(())
        }
        Commands::Export { output } => {
            let history = store.load()?;
            let json = serialize_history(&history).context("Failed to serialize history")?;
            match output {
                Some(path) => {
                    persistence::files::atomic_write(&path, &json)?;
                    println!("Exported {} thoughts to {}", history.len(), path.display());
                }
                None => println!("{}", json),
            }
            Ok(())
        }
    }
}

fn run_tui(store: Box<dyn HistoryStore>, config: Config) -> Result<()> {
    let mut app = AppState::new(store, Box::new(SystemClock), config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    let restored = shutdown(&mut app, || {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    });

    if let Some(e) = &app.last_error {
        eprintln!("Error saving thoughts: {}", e);
    }

    if let Err(err) = result {
        error!(error = %err, "app exited with error");
        eprintln!("Error: {}", err);
    }

    info!("app stopped");
    restored
}

/// Keep whatever was typed, then hand the terminal back
fn shutdown(app: &mut AppState, restore: impl FnOnce() -> Result<()>) -> Result<()> {
    app.commit_draft();
    restore()
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();
    app.resize(terminal.size()?.width);

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key) {
                        return Ok(());
                    }
                }
                Event::Resize(width, _) => app.resize(width),
                _ => {}
            }
        }

        // Tick timers and run the autosave probe
        app.tick(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::MemoryStore;
    use std::rc::Rc;

    #[test]
    fn test_shutdown_commits_even_if_restore_fails() {
        let store = Rc::new(MemoryStore::default());
        let config = Config {
            seed_welcome: false,
            ..Config::default()
        };
        let mut app = AppState::new(Box::new(store.clone()), Box::new(SystemClock), config);
        for c in "unsaved".chars() {
            app.draft_insert_char(c);
        }

        let result = shutdown(&mut app, || Err(anyhow::anyhow!("terminal gone")));

        assert!(result.is_err());
        assert_eq!(store.writes.get(), 1);
        assert_eq!(store.history.borrow().newest().unwrap().text(), "unsaved");
    }
}
