use crate::core::quantizer::QUARTER_HOUR;
use crate::errors::{AppError, AppResult};
use crate::tasklog::{AllowanceCodeTable, legacy_codes};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rounding unit for reported hours.
    #[serde(default = "default_quantum")]
    pub quantum: f64,
    /// Legacy tasklog allowance code -> portal allowance code.
    #[serde(default = "legacy_codes")]
    pub allowance_codes: BTreeMap<String, String>,
    /// WBS code -> title shown on the portal.
    #[serde(default)]
    pub wbs_titles: BTreeMap<String, String>,
    /// Folder holding saved portal pages.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    /// Minimum number of hours rows the form should offer.
    #[serde(default = "default_min_rows")]
    pub min_rows: usize,
}

fn default_quantum() -> f64 {
    QUARTER_HOUR
}
fn default_cache_dir() -> String {
    "~/.rtimesheet/cache".to_string()
}
fn default_min_rows() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quantum: default_quantum(),
            allowance_codes: legacy_codes(),
            wbs_titles: BTreeMap::new(),
            cache_dir: default_cache_dir(),
            min_rows: default_min_rows(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtimesheet")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rtimesheet")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimesheet.conf")
    }

    /// Load configuration from `path`, or return defaults if it does not exist
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !self.quantum.is_finite() || self.quantum <= 0.0 {
            return Err(AppError::Config(format!(
                "quantum must be positive, got {}",
                self.quantum
            )));
        }
        Ok(())
    }

    pub fn allowance_table(&self) -> AllowanceCodeTable {
        AllowanceCodeTable::from(&self.allowance_codes)
    }

    pub fn cache_path(&self) -> PathBuf {
        expand_tilde(&self.cache_dir)
    }

    /// Write the default configuration to `path`, creating its directory.
    /// An existing file is left alone unless `force` is set.
    pub fn init_at(path: &Path, force: bool) -> AppResult<bool> {
        if path.exists() && !force {
            return Ok(false);
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(&Config::default())?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(true)
    }
}
