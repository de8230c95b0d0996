//! kviktime library root.
//! Exposes the balance engine, its SQLite store, the CLI parser and the
//! high-level run() function.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use chrono::NaiveDate;
use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

pub use crate::core::{BalanceEngine, calculate_user_balances};
pub use db::BalanceStore;
pub use models::UserBalances;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Profile { .. } => cli::commands::profile::handle(&cli.command, cfg, today),
        Commands::Shift { .. } => cli::commands::shift::handle(&cli.command, cfg),
        Commands::Adjust { .. } => cli::commands::adjust::handle(&cli.command, cfg),
        Commands::Balance { .. } => cli::commands::balance::handle(&cli.command, cfg, today),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, today),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; --db overrides the configured database,
    // resolved the same way `init` resolves it
    let mut cfg = Config::load()?;
    if let Some(custom_db) = cli.db.as_deref() {
        cfg.database = Config::resolve_db_path(Some(custom_db))
            .to_string_lossy()
            .to_string();
    }

    logging::init(&cfg.log_level);

    let today = match &cli.today {
        Some(s) => utils::date::require_date(s)?,
        None => utils::date::today(),
    };

    tracing::debug!(database = %cfg.database, %today, "dispatching command");
    dispatch(&cli, &cfg, today)
}
