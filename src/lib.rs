//! rTimesheet library root.
//! Exposes the timesheet model, the quarterisation and form reconciliation
//! engine, the tasklog codec, and the CLI front end.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod source;
pub mod tasklog;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::{Path, PathBuf};
use tracing::Level;
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, cfg_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(cli, cfg_path),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, cfg_path),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, cfg),
        Commands::Quarterise { .. } => cli::commands::quarterise::handle(&cli.command, cfg),
        Commands::Query { .. } => cli::commands::query::handle(&cli.command, cfg),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // Keep an already installed subscriber.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg_path: PathBuf = cli
        .config
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(Config::config_file);

    // `init` must work even when the existing file is broken.
    let cfg = match cli.command {
        Commands::Init { .. } => Config::default(),
        _ => Config::load_from(&cfg_path)?,
    };

    dispatch(&cli, &cfg, &cfg_path)
}
