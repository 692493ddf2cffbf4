use super::codes::AllowanceCodeTable;
use crate::errors::{AppError, AppResult};
use crate::models::{HourKind, TimesheetRecord};
use crate::utils::date::parse_iso;
use roxmltree::{Document, Node};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Character data inside an element, ignoring markup.
fn cdata(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn required_attr<'a>(node: Node<'a, '_>, name: &str) -> AppResult<&'a str> {
    node.attribute(name).ok_or_else(|| {
        AppError::Tasklog(format!(
            "<{}> without {} attribute",
            node.tag_name().name(),
            name
        ))
    })
}

fn number_attr(node: Node<'_, '_>, name: &str) -> AppResult<f64> {
    let raw = required_attr(node, name)?;
    raw.trim().parse::<f64>().map_err(|_| {
        AppError::Tasklog(format!(
            "<{}> has invalid {}=\"{}\"",
            node.tag_name().name(),
            name,
            raw
        ))
    })
}

/// `weekend="1"` (or any other non-empty value but `0`) marks overtime.
/// Legacy logs counted any non-empty value, `"0"` included, as overtime.
fn is_weekend(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some(v) if !v.is_empty() && v != "0")
}

/// Build a record from tasklog XML text.
///
/// Allowance entries written by old tasklogs carry no date; those are placed
/// on consecutive days starting with the second day of the week.
pub fn from_tasklog_xml(xml: &str, codes: &AllowanceCodeTable) -> AppResult<TimesheetRecord> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let mut record = TimesheetRecord::new();
    record.name = root
        .descendants()
        .find(|n| n.has_tag_name("name"))
        .map(cdata);
    record.company = root
        .descendants()
        .find(|n| n.has_tag_name("company"))
        .map(cdata);

    let week = root
        .descendants()
        .find(|n| n.has_tag_name("week"))
        .ok_or_else(|| AppError::Tasklog("missing <week> element".into()))?;
    record.set_enddate(parse_iso(required_attr(week, "enddate")?)?)?;

    for time in week.descendants().filter(|n| n.has_tag_name("time")) {
        let wbs = required_attr(time, "jobcode")?;
        let date = parse_iso(required_attr(time, "date")?)?;
        let hours = number_attr(time, "hours")?;
        let kind = if is_weekend(time.attribute("weekend")) {
            HourKind::Ovt
        } else {
            HourKind::Std
        };
        record.add_hours(date, wbs, hours, kind)?;
    }

    let mut next_undated_day = 1;
    for allowance in week.descendants().filter(|n| n.has_tag_name("allowance")) {
        let code = required_attr(allowance, "code")?;
        let quantity = number_attr(allowance, "quantity")?;
        let date = match allowance.attribute("date").filter(|d| !d.trim().is_empty()) {
            Some(d) => parse_iso(d)?,
            None => {
                let d = record.date_for_day(next_undated_day).ok_or_else(|| {
                    AppError::Tasklog("more undated allowances than days in the week".into())
                })?;
                debug!("undated allowance {} placed on {}", code, d);
                next_undated_day += 1;
                d
            }
        };
        record.add_allowance(date, codes.translate(code), quantity)?;
    }

    info!(
        "tasklog: {} jobs, {} allowances, week ending {:?}",
        record.jobs().len(),
        record.allowances().len(),
        record.enddate()
    );
    Ok(record)
}

pub fn from_tasklog_file(path: &Path, codes: &AllowanceCodeTable) -> AppResult<TimesheetRecord> {
    let xml = fs::read_to_string(path)?;
    from_tasklog_xml(&xml, codes)
}
