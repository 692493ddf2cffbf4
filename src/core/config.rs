use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// YAML rendering of the effective configuration.
    pub fn render(cfg: &Config) -> AppResult<String> {
        Ok(serde_yaml::to_string(cfg)?)
    }

    /// Editor to use: explicit choice, then $EDITOR / $VISUAL, then a
    /// platform default.
    pub fn pick_editor(editor: &Option<String>) -> String {
        editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".into()
                } else {
                    "nano".into()
                }
            })
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<String> {
        let ed = Self::pick_editor(editor);

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot run editor '{}': {}", ed, e)))?;
        if !status.success() {
            return Err(AppError::Config(format!("editor '{}' exited with {}", ed, status)));
        }

        // Reject an edit that no longer parses.
        Config::load_from(path)?;
        Ok(ed)
    }
}
