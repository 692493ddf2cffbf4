use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name of the checkbox field the portal uses to delete hours rows.
pub const DEFAULT_DELETE_FIELD: &str = "delete_grid_1";

/// One line of the remote hours grid.
///
/// A line owns two slots: the visible standard-hours row and a hidden
/// overtime row right below it. Ids are opaque tokens (e.g. `grid_1_3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursRow {
    /// Job code already shown on the row; empty for a blank row.
    pub code: String,
    pub std_row: String,
    pub ovt_row: String,
    pub delete_tag: String,
}

/// One line of the remote allowance grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceRow {
    pub code: String,
    pub row_id: String,
}

/// Rows discovered on the remote timesheet page, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteFormModel {
    hours_rows: Vec<HoursRow>,
    allowance_rows: Vec<AllowanceRow>,
    delete_field: String,
}

impl RemoteFormModel {
    /// Build a model, rejecting duplicated row ids or allowance codes.
    pub fn new(hours_rows: Vec<HoursRow>, allowance_rows: Vec<AllowanceRow>) -> AppResult<Self> {
        let mut ids = HashSet::new();
        for row in &hours_rows {
            for id in [&row.std_row, &row.ovt_row] {
                if !ids.insert(id.as_str()) {
                    return Err(AppError::parse(format!("duplicate hours row id {}", id)));
                }
            }
        }

        let mut codes = HashSet::new();
        for row in &allowance_rows {
            if !ids.insert(row.row_id.as_str()) {
                return Err(AppError::parse(format!(
                    "duplicate allowance row id {}",
                    row.row_id
                )));
            }
            if !codes.insert(row.code.as_str()) {
                return Err(AppError::parse(format!(
                    "allowance {} appears on more than one row",
                    row.code
                )));
            }
        }

        Ok(Self {
            hours_rows,
            allowance_rows,
            delete_field: DEFAULT_DELETE_FIELD.to_string(),
        })
    }

    pub fn hours_rows(&self) -> &[HoursRow] {
        &self.hours_rows
    }

    pub fn allowance_rows(&self) -> &[AllowanceRow] {
        &self.allowance_rows
    }

    pub fn delete_field(&self) -> &str {
        &self.delete_field
    }

    pub fn row_count(&self) -> usize {
        self.hours_rows.len()
    }

    pub fn allowance_row(&self, code: &str) -> Option<&AllowanceRow> {
        self.allowance_rows.iter().find(|r| r.code == code)
    }
}
