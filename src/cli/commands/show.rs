use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::submit::SubmitLogic;
use crate::errors::AppResult;
use crate::models::{DAYS, HourKind, TimesheetRecord};
use crate::tasklog::from_tasklog_file;
use crate::utils::date::week_labels;
use crate::utils::formatting::{bold, dim_zero, f2dot};
use crate::utils::table::{Column, Table};
use std::path::Path;

/// Handle the `show` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show {
        timesheet,
        quarterise,
    } = cmd
    {
        let mut record = from_tasklog_file(Path::new(timesheet), &cfg.allowance_table())?;
        if *quarterise {
            SubmitLogic::quarterise(&mut record, cfg.quantum)?;
        }
        print!("{}", render_week(&record));
    }
    Ok(())
}

/// Weekly table: one line per job and hour kind, then one per allowance.
pub fn render_week(record: &TimesheetRecord) -> String {
    let mut out = String::new();

    if let Some(end) = record.enddate() {
        out.push_str(&format!(
            "Week ending {}{}{}\n",
            end,
            record
                .name
                .as_deref()
                .map(|n| format!(" - {}", n))
                .unwrap_or_default(),
            record
                .company
                .as_deref()
                .map(|c| format!(" ({})", c))
                .unwrap_or_default()
        ));
    }

    let mut columns = vec![Column::left("Code"), Column::left("Kind")];
    let labels = record
        .enddate()
        .map(week_labels)
        .unwrap_or_else(|| (1..=DAYS).map(|d| format!("d{}", d)).collect());
    columns.extend(labels.iter().map(|l| Column::right(l)));
    columns.push(Column::right("Total"));
    let mut table = Table::new(columns);

    for (wbs, job) in record.jobs() {
        for kind in HourKind::ALL {
            if kind.is_overtime() && !job.has_overtime() {
                continue;
            }
            let mut row = vec![wbs.clone(), kind.hk_as_str().to_string()];
            row.extend(job.days(kind).iter().map(|h| dim_zero(*h)));
            row.push(bold(&f2dot(job.total(kind))));
            table.add_row(row);
        }
    }

    for (code, al) in record.allowances() {
        let mut row = vec![code.clone(), "ALW".to_string()];
        row.extend(al.days.iter().map(|q| dim_zero(*q)));
        row.push(bold(&f2dot(al.days.iter().sum())));
        table.add_row(row);
    }

    out.push_str(&table.render());
    out.push_str(&format!(
        "Standard {}  Overtime {}\n",
        f2dot(record.total_hours(HourKind::Std)),
        f2dot(record.total_hours(HourKind::Ovt))
    ));
    out
}
