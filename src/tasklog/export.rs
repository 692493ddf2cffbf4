use crate::errors::{AppError, AppResult};
use crate::models::{HourKind, TimesheetRecord};
use crate::utils::formatting::{f2dot, quantity};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fmt::Display;
use std::fs;
use std::io::Cursor;
use std::path::Path;

fn xml_err<E: Display>(e: E) -> AppError {
    AppError::Export(format!("XML write error: {e}"))
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> AppResult<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_err)?;
    Ok(())
}

/// Regenerate tasklog XML from the (adjusted) record.
///
/// Every nonzero value is written: jobs in code order, standard before
/// overtime, days in order; then allowances in code order.
pub fn to_tasklog_xml(record: &TimesheetRecord) -> AppResult<String> {
    let enddate = record
        .enddate()
        .ok_or_else(|| AppError::validation("No enddate set"))?;

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 1);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("timesheet")))
        .map_err(xml_err)?;

    if let Some(name) = &record.name {
        write_text_element(&mut writer, "name", name)?;
    }
    if let Some(company) = &record.company {
        write_text_element(&mut writer, "company", company)?;
    }

    let enddate_str = enddate.format("%Y-%m-%d").to_string();
    let mut week = BytesStart::new("week");
    week.push_attribute(("enddate", enddate_str.as_str()));
    writer.write_event(Event::Start(week)).map_err(xml_err)?;

    for (wbs, job) in record.jobs() {
        for kind in HourKind::ALL {
            for (d, hours) in job.days(kind).iter().enumerate() {
                if *hours == 0.0 {
                    continue;
                }
                let date = day_str(record, d)?;
                let hours = f2dot(*hours);
                let mut time = BytesStart::new("time");
                time.push_attribute(("jobcode", wbs.as_str()));
                time.push_attribute(("date", date.as_str()));
                if kind.is_overtime() {
                    time.push_attribute(("weekend", "1"));
                }
                time.push_attribute(("hours", hours.as_str()));
                writer.write_event(Event::Empty(time)).map_err(xml_err)?;
            }
        }
    }

    for (code, al) in record.allowances() {
        for (d, qty) in al.days.iter().enumerate() {
            if *qty == 0.0 {
                continue;
            }
            let date = day_str(record, d)?;
            let qty = quantity(*qty);
            let mut allowance = BytesStart::new("allowance");
            allowance.push_attribute(("date", date.as_str()));
            allowance.push_attribute(("code", code.as_str()));
            allowance.push_attribute(("quantity", qty.as_str()));
            writer.write_event(Event::Empty(allowance)).map_err(xml_err)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new("week")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("timesheet")))
        .map_err(xml_err)?;

    let mut xml = String::from_utf8(writer.into_inner().into_inner()).map_err(xml_err)?;
    xml.push('\n');
    Ok(xml)
}

fn day_str(record: &TimesheetRecord, day: usize) -> AppResult<String> {
    record
        .date_for_day(day)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| AppError::validation(format!("Day {} outside the week", day)))
}

pub fn write_tasklog_file(record: &TimesheetRecord, path: &Path) -> AppResult<()> {
    let xml = to_tasklog_xml(record)?;
    fs::write(path, xml)?;
    Ok(())
}
