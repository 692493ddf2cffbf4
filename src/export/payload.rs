// src/export/payload.rs

use super::{PayloadFormat, notify_export_success};
use crate::core::reconcile::FormPayload;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// `name value` lines, sorted by field name so a payload reads like the
/// form it fills.
pub fn render_text(payload: &FormPayload) -> String {
    let mut lines: Vec<(&str, &str)> = payload
        .fields()
        .iter()
        .map(|f| (f.name.as_str(), f.value.as_str()))
        .collect();
    lines.sort();

    let mut out = String::new();
    for (name, value) in lines {
        out.push_str(name);
        out.push(' ');
        out.push_str(value);
        out.push('\n');
    }
    out
}

fn render_json(payload: &FormPayload) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(payload)?)
}

fn write_csv<W: Write>(payload: &FormPayload, out: W) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for field in payload.fields() {
        wtr.serialize(field)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `payload` to `path`, or to stdout when no path is given.
pub fn write_payload(
    payload: &FormPayload,
    format: PayloadFormat,
    path: Option<&Path>,
) -> AppResult<()> {
    match path {
        Some(path) => {
            info(format!(
                "Exporting payload as {}: {}",
                format.as_str(),
                path.display()
            ));
            let mut file = File::create(path)?;
            write_to(payload, format, &mut file)?;
            notify_export_success(&format.as_str().to_uppercase(), path);
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_to(payload, format, &mut lock)?;
        }
    }
    Ok(())
}

fn write_to<W: Write>(payload: &FormPayload, format: PayloadFormat, out: &mut W) -> AppResult<()> {
    match format {
        PayloadFormat::Text => out.write_all(render_text(payload).as_bytes())?,
        PayloadFormat::Json => {
            out.write_all(render_json(payload)?.as_bytes())?;
            out.write_all(b"\n")?;
        }
        PayloadFormat::Csv => write_csv(payload, out)?,
    }
    Ok(())
}
