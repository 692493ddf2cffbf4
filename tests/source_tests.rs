mod common;
use common::{hours_inputs, page, rate_spans, temp_dir, write_pages};
use rtimesheet::errors::AppError;
use rtimesheet::models::{AllowanceRow, HoursRow, RemoteFormModel};
use rtimesheet::source::{
    FormInput, FormPage, FormSource, SnapshotSource, parse_hours_inputs, parse_rate_spans,
};

#[test]
fn test_hours_rows_in_page_order() {
    let rows = parse_hours_inputs(&hours_inputs(3, &["23133.A0010"])).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        HoursRow {
            code: "23133.A0010".into(),
            std_row: "grid_1_1".into(),
            ovt_row: "grid_1_2".into(),
            delete_tag: "100".into(),
        }
    );
    assert_eq!(rows[1].code, "");
    assert_eq!(rows[2].std_row, "grid_1_5");
    assert_eq!(rows[2].ovt_row, "grid_1_6");
    assert_eq!(rows[2].delete_tag, "102");
}

#[test]
fn test_row_without_delete_checkbox() {
    let inputs = vec![
        FormInput::new("text", "grid_1_1_wbs_code", ""),
        FormInput::new("hidden", "grid_1_2_wbs_code", ""),
    ];
    let err = parse_hours_inputs(&inputs).unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));
}

#[test]
fn test_row_without_overtime_slot() {
    let inputs = vec![
        FormInput::new("checkbox", "delete_grid_1", "7"),
        FormInput::new("text", "grid_1_1_wbs_code", ""),
    ];
    assert!(matches!(
        parse_hours_inputs(&inputs).unwrap_err(),
        AppError::Parse(_)
    ));
}

#[test]
fn test_allowance_spans() {
    let rows = parse_rate_spans(&rate_spans(&["MES", "SCM"])).unwrap();
    assert_eq!(
        rows,
        vec![
            AllowanceRow {
                code: "MES".into(),
                row_id: "grid_2_1".into(),
            },
            AllowanceRow {
                code: "SCM".into(),
                row_id: "grid_2_2".into(),
            },
        ]
    );
}

#[test]
fn test_missing_grids() {
    let mut p = page(1, &["MES"]);
    p.hours_grid = None;
    assert!(matches!(p.to_model().unwrap_err(), AppError::Parse(_)));

    let mut p = page(1, &["MES"]);
    p.allowance_grid = None;
    assert!(matches!(p.to_model().unwrap_err(), AppError::Parse(_)));

    let mut p = page(1, &["MES"]);
    p.error = Some("Timesheet is locked".into());
    assert!(matches!(p.to_model().unwrap_err(), AppError::Parse(_)));
}

#[test]
fn test_duplicate_ids_rejected() {
    let row = HoursRow {
        code: String::new(),
        std_row: "grid_1_1".into(),
        ovt_row: "grid_1_2".into(),
        delete_tag: "1".into(),
    };
    let err = RemoteFormModel::new(vec![row.clone(), row], vec![]).unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));

    let mes = AllowanceRow {
        code: "MES".into(),
        row_id: "grid_2_1".into(),
    };
    let again = AllowanceRow {
        code: "MES".into(),
        row_id: "grid_2_2".into(),
    };
    assert!(RemoteFormModel::new(vec![], vec![mes, again]).is_err());
}

#[test]
fn test_snapshot_source() {
    let dir = temp_dir("snapshot_source");
    write_pages(&dir, &page(1, &["MES"]), Some(&page(4, &["MES"])));

    let mut source = SnapshotSource::new(&dir);
    let form = source.form_model().unwrap();
    assert_eq!(form.row_count(), 1);
    assert_eq!(form.delete_field(), "delete_grid_1");
    assert_eq!(form.allowance_row("MES").unwrap().row_id, "grid_2_1");

    let form = source.add_rows(3).unwrap();
    assert_eq!(form.row_count(), 4);
    assert_eq!(source.rows_requested(), 3);
}

#[test]
fn test_snapshot_source_missing_pages() {
    let dir = temp_dir("snapshot_missing");
    let mut source = SnapshotSource::new(&dir);
    assert!(matches!(
        source.form_model().unwrap_err(),
        AppError::Source(_)
    ));

    write_pages(&dir, &page(1, &[]), None);
    assert!(source.form_model().is_ok());
    assert!(matches!(source.add_rows(1).unwrap_err(), AppError::Source(_)));
}

#[test]
fn test_snapshot_page_without_grid() {
    let dir = temp_dir("snapshot_nogrid");
    let broken = FormPage {
        error: None,
        hours_grid: None,
        allowance_grid: Some(rate_spans(&["MES"])),
    };
    write_pages(&dir, &broken, None);
    let mut source = SnapshotSource::new(&dir);
    assert!(matches!(
        source.form_model().unwrap_err(),
        AppError::Parse(_)
    ));
}
