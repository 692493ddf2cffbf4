use super::FormSource;
use super::page::FormPage;
use crate::errors::{AppError, AppResult};
use crate::models::RemoteFormModel;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Page shown when the timesheet is opened.
const TS_TAG: &str = "ts";
/// Page returned after rows were added.
const ROWS_TAG: &str = "tsrows";

/// Replays timesheet pages saved as YAML in a cache directory.
///
/// `ts.yaml` is the timesheet as first fetched; `tsrows.yaml` is the page
/// the portal answered with after the rows request.
pub struct SnapshotSource {
    cachedir: PathBuf,
    added: usize,
}

impl SnapshotSource {
    pub fn new(cachedir: &Path) -> Self {
        Self {
            cachedir: cachedir.to_path_buf(),
            added: 0,
        }
    }

    /// Rows requested so far through `add_rows`.
    pub fn rows_requested(&self) -> usize {
        self.added
    }

    fn read_page(&self, tag: &str) -> AppResult<FormPage> {
        let path = self.cachedir.join(format!("{tag}.yaml"));
        info!("replay {}", path.display());
        let content = fs::read_to_string(&path).map_err(|e| {
            AppError::Source(format!("cannot read page {}: {}", path.display(), e))
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

impl FormSource for SnapshotSource {
    fn form_model(&mut self) -> AppResult<RemoteFormModel> {
        self.read_page(TS_TAG)?.to_model()
    }

    fn add_rows(&mut self, count: usize) -> AppResult<RemoteFormModel> {
        self.added += count;
        self.read_page(ROWS_TAG)?.to_model()
    }
}
