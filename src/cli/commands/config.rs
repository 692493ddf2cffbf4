use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::path::Path;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            println!("# {}", path.display());
            print!("{}", ConfigLogic::render(cfg)?);
        }

        if *edit_config {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {}; creating one with defaults",
                    path.display()
                ));
                Config::init_at(path, false)?;
            }
            let used = ConfigLogic::edit(path, editor)?;
            success(format!("Configuration file edited successfully using '{}'", used));
        }
    }

    Ok(())
}
