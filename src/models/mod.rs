pub mod form;
pub mod hour_kind;
pub mod timesheet;

pub use form::{AllowanceRow, HoursRow, RemoteFormModel};
pub use hour_kind::HourKind;
pub use timesheet::{AllowanceEntry, DAYS, JobEntry, TimesheetRecord, Week};
