//! Map a quantized timesheet onto the rows of the remote form.
//!
//! Ordering contract: job codes are taken in ascending order
//! (`TimesheetRecord::wbs_list`) and paired with hours rows in the order the
//! rows were discovered on the page. Rows left over are deleted.

use crate::errors::{AppError, AppResult};
use crate::models::{DAYS, RemoteFormModel, TimesheetRecord, Week};
use crate::utils::formatting::f2dot;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// One `name=value` pair of the form body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

/// Ordered form body ready to be posted.
///
/// Field names are unique, except for the row-deletion checkbox which
/// carries one value per deleted row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormPayload {
    fields: Vec<FormField>,
    #[serde(skip)]
    seen: HashSet<(String, Option<String>)>,
}

impl FormPayload {
    fn push(&mut self, name: String, value: String) -> AppResult<()> {
        if !self.seen.insert((name.clone(), None)) {
            return Err(AppError::Configuration(format!(
                "form field {} would be sent twice",
                name
            )));
        }
        self.fields.push(FormField { name, value });
        Ok(())
    }

    fn push_multi(&mut self, name: String, value: String) -> AppResult<()> {
        if !self.seen.insert((name.clone(), Some(value.clone()))) {
            return Err(AppError::Configuration(format!(
                "form field {}={} would be sent twice",
                name, value
            )));
        }
        self.fields.push(FormField { name, value });
        Ok(())
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Every value of a field, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.name == name)
            .map(|f| f.value.as_str())
            .collect()
    }
}

fn day_field(row: &str, day: usize) -> String {
    format!("{}_d{}", row, day + 1)
}

/// Builds the submission payload for one timesheet.
pub struct FormReconciler<'a> {
    titles: &'a BTreeMap<String, String>,
}

impl<'a> FormReconciler<'a> {
    pub fn new(titles: &'a BTreeMap<String, String>) -> Self {
        Self { titles }
    }

    /// Title shown next to a job code; the code itself when unknown.
    pub fn title_for<'b>(&'b self, wbs: &'b str) -> &'b str {
        self.titles.get(wbs).map(String::as_str).unwrap_or(wbs)
    }

    /// Produce the form body for `record` against the rows of `form`.
    ///
    /// Fails without producing anything when there are more job codes than
    /// hours rows, or when the record holds an allowance the form has no row
    /// for.
    pub fn reconcile(
        &self,
        record: &TimesheetRecord,
        form: &RemoteFormModel,
    ) -> AppResult<FormPayload> {
        let wbss = record.wbs_list();
        let rows = form.hours_rows();
        if wbss.len() > rows.len() {
            return Err(AppError::Capacity {
                needed: wbss.len(),
                available: rows.len(),
            });
        }

        for code in record.allowances().keys() {
            if form.allowance_row(code).is_none() {
                return Err(AppError::Configuration(format!(
                    "Allowance {} not found in form",
                    code
                )));
            }
        }

        let mut payload = FormPayload::default();

        for (wbs, row) in wbss.iter().zip(rows) {
            let Some(job) = record.job(wbs) else {
                continue;
            };
            debug!("{} -> {} / {}", wbs, row.std_row, row.ovt_row);

            // Standard
            self.push_row(&mut payload, &row.std_row, wbs, self.title_for(wbs), &job.std)?;

            // Overtime
            if job.has_overtime() {
                self.push_row(&mut payload, &row.ovt_row, "", "", &job.ovt)?;
            }
        }

        // Allowances
        let zeros: Week = [0.0; DAYS];
        for arow in form.allowance_rows() {
            let days = record
                .allowance(&arow.code)
                .map(|al| &al.days)
                .unwrap_or(&zeros);
            for (d, qty) in days.iter().enumerate() {
                payload.push(day_field(&arow.row_id, d), f2dot(*qty))?;
            }
        }

        // Delete any extra hours rows
        for row in &rows[wbss.len()..] {
            payload.push_multi(form.delete_field().to_string(), row.delete_tag.clone())?;
        }

        info!(
            "reconciled {} jobs onto {} rows, {} rows deleted, {} fields",
            wbss.len(),
            rows.len(),
            rows.len() - wbss.len(),
            payload.len()
        );
        Ok(payload)
    }

    fn push_row(
        &self,
        payload: &mut FormPayload,
        row: &str,
        wbs: &str,
        title: &str,
        days: &Week,
    ) -> AppResult<()> {
        payload.push(format!("{}_wbs_code", row), wbs.to_string())?;
        payload.push(format!("{}_title", row), title.to_string())?;
        for (d, hours) in days.iter().enumerate() {
            payload.push(day_field(row, d), f2dot(*hours))?;
        }
        Ok(())
    }
}
