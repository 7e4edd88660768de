use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use tldr_board::app::{App, AppEvent, ScreenSlot};
use tldr_board::config::Config;
use tldr_board::controller::{LoadState, StateController};
use tldr_board::feed::{build_client, FeedSource};
use tldr_board::storage::{Database, DatabaseError};
use tldr_board::ui::{self, PlainTextSink};

/// Get the config directory path (~/.config/tldr-board/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("tldr-board"))
}

#[derive(Parser, Debug)]
#[command(name = "tldr-board", about = "Terminal board for TLDR digest tiles")]
struct Args {
    /// Feed location (http(s) URL or path to tldr.json); overrides config
    #[arg(long, value_name = "URL|PATH")]
    feed: Option<String>,

    /// Config file path [default: ~/.config/tldr-board/config.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// State database path [default: ~/.config/tldr-board/state.db]
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Start with archived tiles visible
    #[arg(long)]
    show_archived: bool,

    /// Print the board once to stdout instead of starting the TUI
    #[arg(long)]
    print: bool,

    /// Reset state database (forget read and liked tiles)
    #[arg(long)]
    reset_db: bool,
}

/// Send logs to stderr in print mode, to a file while the TUI owns the terminal.
fn init_tracing(print_mode: bool, config_dir: &Path) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    if print_mode {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        let log_path = config_dir.join("tldr-board.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    }
    Ok(())
}

fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;
    }
    Ok(())
}

/// User-only access to the directory holding the state database. Runs after
/// tracing is up so failures reach the log.
#[cfg(unix)]
fn restrict_config_dir(config_dir: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let perms = std::fs::Permissions::from_mode(0o700);
    if let Err(e) = std::fs::set_permissions(config_dir, perms) {
        tracing::warn!(
            path = %config_dir.display(),
            error = %e,
            "Failed to set config directory permissions to 0700"
        );
    }
}

#[cfg(not(unix))]
fn restrict_config_dir(_config_dir: &Path) {}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    ensure_config_dir(&config_dir)?;
    init_tracing(args.print, &config_dir)?;
    restrict_config_dir(&config_dir);

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(feed) = &args.feed {
        config.feed_url = feed.clone();
    }
    if args.show_archived {
        config.show_archived = true;
    }

    let source = FeedSource::parse(&config.feed_url)
        .with_context(|| format!("Invalid feed location '{}'", config.feed_url))?;

    let db_path = args.db.clone().unwrap_or_else(|| config_dir.join("state.db"));
    if args.reset_db && db_path.exists() {
        std::fs::remove_file(&db_path).context("Failed to delete database")?;
        eprintln!("Database reset.");
    }

    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of tldr-board appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to open database: {}", e));
        }
    };

    let client = build_client(config.request_timeout()).context("Failed to build HTTP client")?;
    tracing::info!(source = %source, db = %db_path.display(), "Starting");

    if args.print {
        let sink = PlainTextSink::new(std::io::stdout().lock());
        let mut controller = StateController::new(db, client, source, &config, sink);
        controller.refresh().await;
        if let Some(e) = controller.sink_mut().take_error() {
            return Err(e).context("Failed to write board");
        }
        if controller.load_state() == LoadState::Error {
            std::process::exit(2);
        }
        return Ok(());
    }

    let controller = StateController::new(db, client, source, &config, ScreenSlot::default());
    let mut app = App::new(controller);
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(8);
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
