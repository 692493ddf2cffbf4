// src/export/mod.rs

mod fs_utils;
mod payload;

pub use fs_utils::ensure_writable;
pub use payload::{render_text, write_payload};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Final status line once a payload file is written.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

/// How a form payload is written out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PayloadFormat {
    /// `name value` lines sorted by field name
    Text,
    Json,
    Csv,
}

impl PayloadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadFormat::Text => "text",
            PayloadFormat::Json => "json",
            PayloadFormat::Csv => "csv",
        }
    }
}
