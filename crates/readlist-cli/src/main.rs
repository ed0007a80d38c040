//! readlist CLI
//!
//! Command-line interface for readlist - a personal reading list backed by
//! the Open Library catalog.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use readlist_core::{CatalogClient, Config, Hydration, Status, StorageError, Store};

mod commands;
mod logging;
mod output;
mod prompt;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "readlist")]
#[command(about = "readlist - Track the books you are reading, want to read and have read")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file (overrides READLIST_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// List the reading list
    #[command(alias = "ls")]
    List {
        /// Only show one status (reading, later, done)
        #[arg(short, long)]
        status: Option<Status>,
    },
    /// Show a tracked book
    Show {
        /// Book key (full key or trailing segment, e.g. OL45804W)
        key: String,
    },
    /// Search the catalog
    Search {
        /// Search query
        query: String,
        /// Result page (100 results per page)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Add a search result to the reading list
    Add {
        /// Search query the book appears under
        query: String,
        /// Key of the result to add
        #[arg(short, long)]
        key: String,
        /// Result page the book appears on
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Initial status (defaults to For Later)
        #[arg(short, long)]
        status: Option<Status>,
    },
    /// Move a book to another status
    Move {
        /// Book key (full key or trailing segment)
        key: String,
        /// New status (reading, later, done)
        status: Status,
    },
    /// Reorder a book within its status column
    Reorder {
        /// Status column (reading, later, done)
        status: Status,
        /// Current position (0-based)
        from: usize,
        /// New position (0-based)
        to: usize,
    },
    /// Remove a book from the reading list
    #[command(alias = "rm")]
    Remove {
        /// Book key (full key or trailing segment)
        key: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show storage location and counts
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, catalog_url, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let result = run(Cli::parse()).await;

    if let Err(e) = &result {
        if let Some(hint) = storage_hint(e) {
            eprintln!("Hint: {}", hint);
        }
    }

    result
}

async fn run(cli: Cli) -> Result<()> {
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Commands that don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        logging::init_cli();
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    // Handle TUI (default when no command given)
    let Some(command) = cli.command else {
        logging::init_tui(&config);
        let store = Store::open_with_config(config)?;
        return tui::run(store).await;
    };
    if matches!(command, Commands::Tui) {
        logging::init_tui(&config);
        let store = Store::open_with_config(config)?;
        return tui::run(store).await;
    }

    logging::init_cli();
    let mut store = Store::open_with_config(config)?;
    report_hydration(&store, &output);

    match command {
        Commands::Tui | Commands::Config { .. } => Ok(()), // Handled above
        Commands::List { status } => commands::book::list(&store, status, &output),
        Commands::Show { key } => commands::book::show(&store, key, &output),
        Commands::Search { query, page } => {
            let client = catalog_client(&store)?;
            commands::search::search(&store, &client, query, page, &output).await
        }
        Commands::Add {
            query,
            key,
            page,
            status,
        } => {
            let client = catalog_client(&store)?;
            commands::search::add(&mut store, &client, query, key, page, status, &output).await
        }
        Commands::Move { key, status } => {
            commands::book::move_to(&mut store, key, status, &output)
        }
        Commands::Reorder { status, from, to } => {
            commands::book::reorder(&mut store, status, from, to, &output)
        }
        Commands::Remove { key, yes } => commands::book::remove(&mut store, key, yes, &output),
        Commands::Status => commands::status::show(&store, &output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Build a catalog client from the store's configuration
fn catalog_client(store: &Store) -> Result<CatalogClient> {
    CatalogClient::new(&store.config().catalog_url).context("Failed to create catalog client")
}

/// Recovery suggestion for a storage failure anywhere in the error chain
fn storage_hint(error: &anyhow::Error) -> Option<&'static str> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<StorageError>())
        .and_then(StorageError::recovery_suggestion)
}

/// Tell the user when an unreadable reading list was set aside
fn report_hydration(store: &Store, output: &Output) {
    if let Hydration::Recovered {
        details,
        backup_key,
    } = store.hydration()
    {
        output.warn(&format!(
            "Saved reading list could not be read ({}). Started empty; the old data was kept under '{}'.",
            details, backup_key
        ));
    }
}
