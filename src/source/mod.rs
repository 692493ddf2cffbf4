//! Access to the remote timesheet form.

mod page;
mod snapshot;

pub use page::{FormInput, FormPage, RateSpan, parse_hours_inputs, parse_rate_spans};
pub use snapshot::SnapshotSource;

use crate::errors::AppResult;
use crate::models::RemoteFormModel;

/// Supplies the rows of the timesheet form being filled.
///
/// Implementations fail with `AppError::Parse` when the page lacks the
/// hours or allowance grid.
pub trait FormSource {
    /// Rows currently on the form.
    fn form_model(&mut self) -> AppResult<RemoteFormModel>;

    /// Ask the portal for `count` more hours rows and return the refreshed
    /// form.
    fn add_rows(&mut self, count: usize) -> AppResult<RemoteFormModel>;
}
