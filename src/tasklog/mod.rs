//! Weekly tasklog XML: import into a `TimesheetRecord` and write it back.

mod codes;
mod export;
mod import;

pub use codes::{AllowanceCodeTable, legacy_codes};
pub use export::{to_tasklog_xml, write_tasklog_file};
pub use import::{from_tasklog_file, from_tasklog_xml};
