mod common;
use common::{page, rts, sample_tasklog, temp_dir, temp_path, write_pages};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;

fn p(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

#[test]
fn test_init_creates_config() {
    let cfg = temp_dir("cli_init").join("rtimesheet.conf");

    rts()
        .args(["--config", p(&cfg), "init"])
        .assert()
        .success();
    let content = fs::read_to_string(&cfg).expect("config written");
    assert!(content.contains("quantum: 0.25"));
    assert!(content.contains("ABP: SCM"));

    // Second run keeps the file
    rts()
        .args(["--config", p(&cfg), "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("already present"));

    fs::write(&cfg, "quantum: 0.5\n").unwrap();
    rts()
        .args(["--config", p(&cfg), "init", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&cfg).unwrap().contains("quantum: 0.25"));
}

#[test]
fn test_config_print() {
    let cfg = temp_path("cli_config_print", "conf");
    fs::write(&cfg, "quantum: 0.5\nwbs_titles:\n  J1: Design\n").unwrap();

    rts()
        .args(["--config", p(&cfg), "config", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quantum: 0.5"))
        .stdout(predicate::str::contains("J1: Design"))
        .stdout(predicate::str::contains("min_rows: 1"));
}

#[test]
fn test_invalid_config_rejected() {
    let cfg = temp_path("cli_config_bad", "conf");
    fs::write(&cfg, "quantum: -1\n").unwrap();

    rts()
        .args(["--config", p(&cfg), "config", "--print"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quantum must be positive"));
}

#[test]
fn test_show_weekly_table() {
    let cfg = temp_path("cli_show", "conf");
    let log = sample_tasklog("cli_show");

    rts()
        .args(["--config", p(&cfg), "show", "--timesheet", p(&log)])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Week ending 2024-01-06 - Jo Bloggs (Acme & Co)",
        ))
        .stdout(predicate::str::contains("22614.A0110"))
        .stdout(predicate::str::contains("OVT"))
        .stdout(predicate::str::contains("SCM"))
        .stdout(predicate::str::contains("Standard 12.75  Overtime 3.00"));
}

#[test]
fn test_quarterise_to_other_file() {
    let cfg = temp_path("cli_quarterise", "conf");
    let src = temp_path("cli_quarterise_src", "xml");
    let dst = temp_path("cli_quarterise_dst", "xml");
    let original = r#"<?xml version="1.0"?>
<timesheet>
 <week enddate="2024-01-06">
  <time jobcode="J1" date="2023-12-31" hours="1.1"/>
  <time jobcode="J1" date="2024-01-01" hours="1.1"/>
  <time jobcode="J1" date="2024-01-02" hours="1.1"/>
 </week>
</timesheet>
"#;
    fs::write(&src, original).unwrap();

    rts()
        .args([
            "--config",
            p(&cfg),
            "quarterise",
            "--timesheet",
            p(&src),
            "--out",
            p(&dst),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("3.30 -> 3.50"));

    let out = fs::read_to_string(&dst).unwrap();
    assert!(out.contains(r#"<time jobcode="J1" date="2023-12-31" hours="1.25"/>"#));
    assert!(out.contains(r#"<time jobcode="J1" date="2024-01-02" hours="1.00"/>"#));
    // Source left alone
    assert_eq!(fs::read_to_string(&src).unwrap(), original);
}

#[test]
fn test_query_text_payload() {
    let cfg = temp_path("cli_query_text", "conf");
    let log = sample_tasklog("cli_query_text");
    let cache = temp_dir("cli_query_text_cache");
    write_pages(&cache, &page(3, &["MES", "SCM"]), None);

    rts()
        .args([
            "--config",
            p(&cfg),
            "query",
            "--timesheet",
            p(&log),
            "--date",
            "2024-01-06",
            "--cache",
            p(&cache),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("grid_1_1_wbs_code 22614.A0110"))
        .stdout(predicate::str::contains("grid_1_2_d7 3.00"))
        .stdout(predicate::str::contains("grid_1_3_wbs_code 23133.A0010"))
        .stdout(predicate::str::contains("grid_1_3_d2 5.50"))
        .stdout(predicate::str::contains("grid_2_1_d4 1.00"))
        .stdout(predicate::str::contains("delete_grid_1 102"));

    // The adjusted log was written back and still imports
    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains(r#"code="MES""#));
}

#[test]
fn test_query_json_with_rows_request() {
    let cfg = temp_path("cli_query_json", "conf");
    fs::write(&cfg, "wbs_titles:\n  23133.A0010: Diagnostics\n").unwrap();
    let log = sample_tasklog("cli_query_json");
    let cache = temp_dir("cli_query_json_cache");
    write_pages(
        &cache,
        &page(1, &["MES", "SCM"]),
        Some(&page(3, &["MES", "SCM"])),
    );
    let out = temp_path("cli_query_json_out", "json");

    rts()
        .args([
            "--config",
            p(&cfg),
            "query",
            "--timesheet",
            p(&log),
            "--date",
            "2024-01-06",
            "--cache",
            p(&cache),
            "--format",
            "json",
            "--out",
            p(&out),
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let json: Value = serde_json::from_str(&content).expect("valid json");
    let fields = json.as_array().expect("array of fields");
    assert!(fields.iter().any(|f| f["name"] == "grid_1_3_title" && f["value"] == "Diagnostics"));
    let deletes: Vec<_> = fields
        .iter()
        .filter(|f| f["name"] == "delete_grid_1")
        .collect();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0]["value"], "102");

    // Existing output is not overwritten without --force
    rts()
        .args([
            "--config",
            p(&cfg),
            "query",
            "--timesheet",
            p(&log),
            "--date",
            "2024-01-06",
            "--cache",
            p(&cache),
            "--out",
            p(&out),
        ])
        .assert()
        .failure();
}

#[test]
fn test_query_csv() {
    let cfg = temp_path("cli_query_csv", "conf");
    let log = sample_tasklog("cli_query_csv");
    let cache = temp_dir("cli_query_csv_cache");
    write_pages(&cache, &page(2, &["MES", "SCM"]), None);

    rts()
        .args([
            "--config",
            p(&cfg),
            "query",
            "--timesheet",
            p(&log),
            "--date",
            "2024-01-06",
            "--cache",
            p(&cache),
            "--format",
            "csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name,value"))
        .stdout(predicate::str::contains("grid_1_1_wbs_code,22614.A0110"));
}

#[test]
fn test_query_wrong_week() {
    let cfg = temp_path("cli_query_week", "conf");
    let log = sample_tasklog("cli_query_week");
    let cache = temp_dir("cli_query_week_cache");
    write_pages(&cache, &page(3, &["MES", "SCM"]), None);

    rts()
        .args([
            "--config",
            p(&cfg),
            "query",
            "--timesheet",
            p(&log),
            "--date",
            "2024-01-13",
            "--cache",
            p(&cache),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not 2024-01-13"));
}

#[test]
fn test_query_unknown_allowance() {
    let cfg = temp_path("cli_query_allowance", "conf");
    let log = sample_tasklog("cli_query_allowance");
    let cache = temp_dir("cli_query_allowance_cache");
    write_pages(&cache, &page(3, &["MES"]), None);

    rts()
        .args([
            "--config",
            p(&cfg),
            "query",
            "--timesheet",
            p(&log),
            "--date",
            "2024-01-06",
            "--cache",
            p(&cache),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Allowance SCM not found in form"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_query_form_too_small() {
    let cfg = temp_path("cli_query_small", "conf");
    let log = sample_tasklog("cli_query_small");
    let cache = temp_dir("cli_query_small_cache");
    write_pages(
        &cache,
        &page(1, &["MES", "SCM"]),
        Some(&page(1, &["MES", "SCM"])),
    );

    rts()
        .args([
            "--config",
            p(&cfg),
            "query",
            "--timesheet",
            p(&log),
            "--date",
            "2024-01-06",
            "--cache",
            p(&cache),
        ])
        .assert()
        .failure();
}
