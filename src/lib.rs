//! zcapture library root.
//! Exposes the CLI parser, the high-level run() function, and the ledger core
//! (store, schema migration, task toggle and task extraction).

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

pub use crate::core::extract::{ExtractReport, TaskExtractor, TaskFilter};
pub use errors::{AppError, ErrorKind};
pub use ledger::NoteStore;
pub use models::entry::{Entry, EntryFields};
pub use models::toggle::TaskToggleState;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::Capture => cli::commands::capture::handle(cfg),
        Commands::Migrate { .. } => cli::commands::migrate::handle(&cli.command, cfg),
        Commands::Extract { .. } => cli::commands::extract::handle(&cli.command, cfg),
        Commands::Tasks => cli::commands::tasks::handle(cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once
    let mut cfg = Config::load()?;

    if let Some(custom) = &cli.ledger {
        cfg.ledger = custom.clone();
    }

    dispatch(&cli, &cfg)
}
