//! Unified application error type.
//! All modules (models, core, tasklog, source, cli) return AppError so that
//! a failed submission attempt always surfaces through a single channel.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Timesheet domain
    // ---------------------------
    /// Date outside the week window, conflicting enddate, negative value,
    /// unknown hour kind, bad quantum.
    #[error("Validation error: {0}")]
    Validation(String),

    /// More job codes than hours rows on the remote form.
    #[error("Need {needed} hours rows, only {available} available")]
    Capacity { needed: usize, available: usize },

    /// The remote form cannot represent something the record holds.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ---------------------------
    // Collaborators
    // ---------------------------
    /// Expected page structure is absent.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Form source error: {0}")]
    Source(String),

    #[error("Invalid tasklog: {0}")]
    Tasklog(String),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        AppError::Parse(msg.into())
    }
}
