use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::submit::SubmitLogic;
use crate::errors::AppResult;
use crate::models::HourKind;
use crate::tasklog::{from_tasklog_file, write_tasklog_file};
use crate::ui::messages::success;
use crate::utils::formatting::f2dot;
use std::path::Path;

/// Round the hours of a tasklog and write the adjusted log back.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Quarterise { timesheet, out } = cmd {
        let src = Path::new(timesheet);
        let dst = out.as_deref().map(Path::new).unwrap_or(src);

        let mut record = from_tasklog_file(src, &cfg.allowance_table())?;
        let before = record.total_hours(HourKind::Std);
        SubmitLogic::quarterise(&mut record, cfg.quantum)?;
        write_tasklog_file(&record, dst)?;

        success(format!(
            "Standard hours {} -> {}, written to {}",
            f2dot(before),
            f2dot(record.total_hours(HourKind::Std)),
            dst.display()
        ));
    }
    Ok(())
}
