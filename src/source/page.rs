//! Recognise the timesheet grids among the inputs extracted from a page.
//!
//! Hours grid (`grid_1`), per line:
//!
//! ```text
//! checkbox delete_grid_1      23            <- delete tag
//! text     grid_1_1_wbs_code  23133.A0010   <- standard row, job code
//! text     grid_1_1_d1 .. d7
//! hidden   grid_1_2_wbs_code                <- overtime row
//! text     grid_1_2_d1 .. d7
//! ```
//!
//! Allowance grid (`grid_2`): one `<span id="grid_2_<n>_rate_code" val="CODE">`
//! per line.

use crate::errors::{AppError, AppResult};
use crate::models::form::DEFAULT_DELETE_FIELD;
use crate::models::{AllowanceRow, HoursRow, RemoteFormModel};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static WBS_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(grid_1_\d+)_wbs_code$").expect("valid regex"));

static RATE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(grid_2_\d+)_rate_code$").expect("valid regex"));

/// An `<input>` element of the hours grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl FormInput {
    pub fn new(kind: &str, name: &str, value: &str) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// A rate-code `<span>` of the allowance grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSpan {
    pub id: String,
    pub val: String,
}

/// What the DOM layer extracted from one timesheet page.
///
/// A grid that was not found on the page is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPage {
    /// Text of an error paragraph shown by the portal, if any.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub hours_grid: Option<Vec<FormInput>>,
    #[serde(default)]
    pub allowance_grid: Option<Vec<RateSpan>>,
}

impl FormPage {
    pub fn to_model(&self) -> AppResult<RemoteFormModel> {
        if let Some(err) = &self.error {
            return Err(AppError::parse(format!("portal reported: {}", err.trim())));
        }
        let hours = self
            .hours_grid
            .as_deref()
            .ok_or_else(|| AppError::parse("div#grid_1 not found"))?;
        let allowances = self
            .allowance_grid
            .as_deref()
            .ok_or_else(|| AppError::parse("div#grid_2 not found"))?;

        RemoteFormModel::new(parse_hours_inputs(hours)?, parse_rate_spans(allowances)?)
    }
}

/// Hours rows in page order.
pub fn parse_hours_inputs(inputs: &[FormInput]) -> AppResult<Vec<HoursRow>> {
    let mut rows: Vec<HoursRow> = Vec::new();
    let mut deltag: Option<String> = None;
    let mut awaiting_ovt = false;

    for inp in inputs {
        if inp.name == DEFAULT_DELETE_FIELD && inp.kind == "checkbox" {
            deltag = Some(inp.value.clone());
            continue;
        }
        let Some(caps) = WBS_FIELD.captures(&inp.name) else {
            continue;
        };
        let row_id = caps[1].to_string();

        match inp.kind.as_str() {
            "text" => {
                if awaiting_ovt {
                    return Err(AppError::parse(format!(
                        "hours row before {} has no overtime slot",
                        row_id
                    )));
                }
                let delete_tag = deltag.take().ok_or_else(|| {
                    AppError::parse(format!("hours row {} has no delete checkbox", row_id))
                })?;
                rows.push(HoursRow {
                    code: inp.value.trim().to_string(),
                    std_row: row_id,
                    ovt_row: String::new(),
                    delete_tag,
                });
                awaiting_ovt = true;
            }
            "hidden" => {
                let row = rows.last_mut().filter(|_| awaiting_ovt).ok_or_else(|| {
                    AppError::parse(format!("overtime slot {} without a row", row_id))
                })?;
                row.ovt_row = row_id;
                awaiting_ovt = false;
            }
            _ => {}
        }
    }

    if awaiting_ovt {
        return Err(AppError::parse("last hours row has no overtime slot"));
    }
    Ok(rows)
}

/// Allowance rows in page order. Spans that are not rate codes (headers)
/// are skipped.
pub fn parse_rate_spans(spans: &[RateSpan]) -> AppResult<Vec<AllowanceRow>> {
    Ok(spans
        .iter()
        .filter_map(|span| {
            RATE_SPAN.captures(&span.id).map(|caps| AllowanceRow {
                code: span.val.trim().to_string(),
                row_id: caps[1].to_string(),
            })
        })
        .collect())
}
