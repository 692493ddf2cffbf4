use crate::core::quantizer::Quantizer;
use crate::core::reconcile::{FormPayload, FormReconciler};
use crate::errors::AppResult;
use crate::models::{RemoteFormModel, TimesheetRecord};
use crate::source::FormSource;
use std::collections::BTreeMap;
use tracing::info;

/// High-level logic for preparing a timesheet submission.
pub struct SubmitLogic;

/// Outcome of `SubmitLogic::prepare`.
#[derive(Debug)]
pub struct Submission {
    pub form: RemoteFormModel,
    pub payload: FormPayload,
    /// Hours rows requested from the portal before reconciling.
    pub rows_added: usize,
}

impl SubmitLogic {
    /// Round the record in place.
    pub fn quarterise(record: &mut TimesheetRecord, quantum: f64) -> AppResult<()> {
        let quantizer = Quantizer::new(quantum)?;
        quantizer.quarterise(record)
    }

    /// Fetch the form, request the missing hours rows once if the form is
    /// short of `max(job count, min_rows)`, and build the payload.
    ///
    /// A form that is still too small after the request fails with
    /// `AppError::Capacity`.
    pub fn prepare<S: FormSource>(
        source: &mut S,
        record: &TimesheetRecord,
        titles: &BTreeMap<String, String>,
        min_rows: usize,
    ) -> AppResult<Submission> {
        let mut form = source.form_model()?;
        let needed = record.wbs_list().len().max(min_rows);

        let mut rows_added = 0;
        if form.row_count() < needed {
            rows_added = needed - form.row_count();
            info!(
                "form has {} hours rows, {} needed: requesting {} more",
                form.row_count(),
                needed,
                rows_added
            );
            form = source.add_rows(rows_added)?;
        }

        let payload = FormReconciler::new(titles).reconcile(record, &form)?;
        Ok(Submission {
            form,
            payload,
            rows_added,
        })
    }
}
