use crate::cli::parser::{Cli, Commands};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::path::Path;

/// Handle the `init` command
///
/// Creates the configuration directory and a configuration file holding
/// the defaults (quarter-hour quantum, legacy allowance codes).
pub fn handle(cli: &Cli, path: &Path) -> AppResult<()> {
    let force = matches!(cli.command, Commands::Init { force: true });

    if crate::config::Config::init_at(path, force)? {
        success(format!("Config file: {}", path.display()));
    } else {
        info(format!(
            "Config file already present: {} (use --force to reset it)",
            path.display()
        ));
    }
    Ok(())
}
