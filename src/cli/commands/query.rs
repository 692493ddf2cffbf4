use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::submit::SubmitLogic;
use crate::errors::{AppError, AppResult};
use crate::export::{ensure_writable, write_payload};
use crate::source::SnapshotSource;
use crate::tasklog::{from_tasklog_file, write_tasklog_file};
use crate::ui::messages::info;
use crate::utils::date::{last_saturday, parse_iso};
use crate::utils::path::expand_tilde;
use std::path::Path;

/// Build the form submission for a tasklog.
///
/// 1. load the tasklog and check it is the requested week
/// 2. quarterise and write the adjusted tasklog back
/// 3. read the saved timesheet page, asking for rows if short
/// 4. reconcile and print/export the payload
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Query {
        timesheet,
        date,
        cache,
        rows,
        format,
        out,
        force,
    } = cmd
    {
        let out_path = out.as_deref().map(Path::new);
        if let Some(p) = out_path {
            ensure_writable(p, *force)?;
        }

        let week = match date {
            Some(d) => parse_iso(d)?,
            None => last_saturday(),
        };

        let path = Path::new(timesheet);
        let mut record = from_tasklog_file(path, &cfg.allowance_table())?;
        if record.enddate() != Some(week) {
            return Err(AppError::validation(format!(
                "Tasklog {} is for week ending {}, not {}",
                timesheet,
                record
                    .enddate()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "?".into()),
                week
            )));
        }

        SubmitLogic::quarterise(&mut record, cfg.quantum)?;
        write_tasklog_file(&record, path)?;
        info(format!("Adjusted tasklog written to {}", path.display()));

        let cachedir = cache
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| cfg.cache_path());
        let mut source = SnapshotSource::new(&cachedir);
        let submission = SubmitLogic::prepare(
            &mut source,
            &record,
            &cfg.wbs_titles,
            rows.unwrap_or(cfg.min_rows),
        )?;
        if submission.rows_added > 0 {
            info(format!(
                "Requested {} more hours rows",
                submission.rows_added
            ));
        }

        write_payload(&submission.payload, *format, out_path)?;
    }
    Ok(())
}
