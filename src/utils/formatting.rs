//! Formatting utilities used for CLI and form outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Two-decimal rendering used by the portal and the tasklog (`7.50`).
pub fn f2dot(value: f64) -> String {
    format!("{:.2}", value)
}

/// Quantities are whole numbers in the tasklog.
pub fn quantity(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Grey out zeros so the busy days stand out in the weekly table.
pub fn dim_zero(value: f64) -> String {
    let s = f2dot(value);
    if value == 0.0 {
        format!("\x1b[90m{}\x1b[0m", s)
    } else {
        s
    }
}
