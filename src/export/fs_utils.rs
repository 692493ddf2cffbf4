// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::io;
use std::path::Path;

/// Refuse to clobber an existing output file unless `force` is set.
pub fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));
    Err(AppError::from(io::Error::other(
        "Export cancelled: existing file not overwritten",
    )))
}
