#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rtimesheet::source::{FormInput, FormPage, RateSpan};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rts() -> Command {
    cargo_bin_cmd!("rtimesheet")
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Week used throughout the tests: Sunday 2023-12-31 .. Saturday 2024-01-06.
pub fn week_end() -> NaiveDate {
    ymd(2024, 1, 6)
}

/// Create a unique path inside the system temp dir and remove any leftover
pub fn temp_path(name: &str, ext: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("rtimesheet_{}.{}", name, ext));
    fs::remove_file(&path).ok();
    path
}

/// Fresh empty directory inside the system temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("rtimesheet_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

pub const SAMPLE_TASKLOG: &str = r#"<?xml version="1.0"?>
<timesheet>
 <name>Jo Bloggs</name>
 <company>Acme &amp; Co</company>
 <week enddate="2024-01-06">
  <time jobcode="23133.A0010" date="2024-01-01" hours="4.5"/>
  <time jobcode="23133.A0010" date="2024-01-01" hours="1.0"/>
  <time jobcode="22614.A0110" date="2024-01-02" hours="7.25"/>
  <time jobcode="22614.A0110" date="2024-01-06" weekend="1" hours="3"/>
  <allowance code="ALH" quantity="1" date="2024-01-03"/>
  <allowance code="ABP" quantity="1"/>
  <allowance code="ABP" quantity="1"/>
 </week>
</timesheet>
"#;

/// Write the sample tasklog to a fresh temp file
pub fn sample_tasklog(name: &str) -> PathBuf {
    let path = temp_path(name, "xml");
    fs::write(&path, SAMPLE_TASKLOG).expect("write tasklog");
    path
}

/// Inputs of an hours grid with `rows` lines.
///
/// Line `i` uses `grid_1_{2i+1}` for standard hours, `grid_1_{2i+2}` for
/// overtime and delete tag `{100+i}`. `codes` pre-fills the first lines.
pub fn hours_inputs(rows: usize, codes: &[&str]) -> Vec<FormInput> {
    let mut inputs = vec![FormInput::new("hidden", "delete_grid_1", "")];
    for i in 0..rows {
        let std_row = format!("grid_1_{}", 2 * i + 1);
        let ovt_row = format!("grid_1_{}", 2 * i + 2);
        let code = codes.get(i).copied().unwrap_or("");
        inputs.push(FormInput::new(
            "checkbox",
            "delete_grid_1",
            &(100 + i).to_string(),
        ));
        inputs.push(FormInput::new("text", &format!("{std_row}_wbs_code"), code));
        inputs.push(FormInput::new("text", &format!("{std_row}_title"), ""));
        for d in 1..=7 {
            inputs.push(FormInput::new("text", &format!("{std_row}_d{d}"), ""));
        }
        inputs.push(FormInput::new("hidden", &format!("{ovt_row}_wbs_code"), ""));
        inputs.push(FormInput::new("hidden", &format!("{ovt_row}_title"), ""));
        for d in 1..=7 {
            inputs.push(FormInput::new("text", &format!("{ovt_row}_d{d}"), ""));
        }
    }
    inputs
}

/// Rate-code spans for allowance rows `grid_2_1`, `grid_2_2`, ...
pub fn rate_spans(codes: &[&str]) -> Vec<RateSpan> {
    let mut spans = vec![RateSpan {
        id: "header".into(),
        val: "".into(),
    }];
    for (i, code) in codes.iter().enumerate() {
        spans.push(RateSpan {
            id: format!("grid_2_{}_rate_code", i + 1),
            val: code.to_string(),
        });
    }
    spans
}

pub fn page(rows: usize, allowances: &[&str]) -> FormPage {
    FormPage {
        error: None,
        hours_grid: Some(hours_inputs(rows, &[])),
        allowance_grid: Some(rate_spans(allowances)),
    }
}

/// Save `ts.yaml` (and `tsrows.yaml` when given) as the cached portal pages
pub fn write_pages(dir: &PathBuf, ts: &FormPage, tsrows: Option<&FormPage>) {
    fs::write(
        dir.join("ts.yaml"),
        serde_yaml::to_string(ts).expect("serialize page"),
    )
    .expect("write ts.yaml");
    if let Some(p) = tsrows {
        fs::write(
            dir.join("tsrows.yaml"),
            serde_yaml::to_string(p).expect("serialize page"),
        )
        .expect("write tsrows.yaml");
    }
}
