// AppInventory - tests/e2e_pipeline.rs
//
// End-to-end tests for the report-to-spreadsheet pipeline.
//
// These tests exercise the real filesystem, real chrono date arithmetic
// and the real CSV / JSON / XLSX writers. No mocks, no stubs: each test
// goes from a text report on disk to an output file on disk.

use appinventory::app::pipeline::{run, PipelineOptions};
use appinventory::core::model::ExportFormat;
use appinventory::util::error::{AppInventoryError, InputError};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Fixed reference date so usage buckets are deterministic.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

/// Read a CSV export back as rows of owned strings (header included).
fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

// =============================================================================
// Fixture report
// =============================================================================

/// The fixture contains eight blocks: the "Applications:" section header,
/// five installed apps and two outside Applications directories.
#[test]
fn e2e_fixture_to_csv_filters_sorts_and_classifies() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("inventory.csv");
    let options = PipelineOptions::new(fixture("installed_applications.txt"), &output, today());

    let report = run(&options).unwrap();

    assert_eq!(report.format, ExportFormat::Csv);
    assert_eq!(report.records_written, 5);
    assert_eq!(report.blocks_seen, 8);
    assert_eq!(report.blocks_discarded, 3);
    assert_eq!(report.warnings, 0);

    let rows = read_csv(&output);
    assert_eq!(
        rows,
        vec![
            row(&["ID", "Name", "Version", "Vendor", "Used", "License Type", "OS"]),
            row(&["1", "BBEdit", "15.0", "", "Frequently", "Paid", "macOS"]),
            row(&[
                "2",
                "iTerm",
                "3.4.23",
                "Alice Smith (Q1W2E3R4T5)",
                "Frequently",
                "Freeware",
                "macOS",
            ]),
            row(&[
                "3",
                "Slack",
                "4.36.140",
                "Slack Technologies, Inc. (BQR82RBBHL)",
                "Frequently",
                "",
                "macOS",
            ]),
            row(&[
                "4",
                "VLC",
                "3.0.20",
                "VideoLAN (75GAHG3SZQ)",
                "Rarely",
                "Open Source",
                "macOS",
            ]),
            row(&[
                "5",
                "Xcode",
                "15.2",
                "Apple Mac OS Application Signing, Apple Worldwide Developer Relations \
                 Certification Authority, Apple Root CA",
                "Occasionally",
                "",
                "macOS",
            ]),
        ]
    );
}

#[test]
fn e2e_fixture_to_xlsx() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("Installed_Applications.xlsx");
    let options = PipelineOptions::new(fixture("installed_applications.txt"), &output, today());

    let report = run(&options).unwrap();

    assert_eq!(report.format, ExportFormat::Xlsx);
    assert_eq!(report.records_written, 5);
    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"PK"), "xlsx output should be a zip archive");

    let mut workbook: Xlsx<_> = open_workbook(&output).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Applications".to_string()]);

    let range = workbook.worksheet_range("Applications").unwrap();
    let rows: Vec<&[Data]> = range.rows().collect();
    assert_eq!(rows.len(), 6);

    let header: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
    assert_eq!(
        header,
        ["ID", "Name", "Version", "Vendor", "Used", "License Type", "OS"]
    );

    let ids: Vec<Data> = rows[1..].iter().map(|r| r[0].clone()).collect();
    assert_eq!(
        ids,
        vec![
            Data::Float(1.0),
            Data::Float(2.0),
            Data::Float(3.0),
            Data::Float(4.0),
            Data::Float(5.0),
        ]
    );
    for data_row in &rows[1..] {
        assert_eq!(data_row[6], Data::String("macOS".to_string()));
    }

    // iTerm: every column populated.
    let iterm: Vec<String> = rows[2].iter().map(|c| c.to_string()).collect();
    assert_eq!(
        iterm,
        [
            "2",
            "iTerm",
            "3.4.23",
            "Alice Smith (Q1W2E3R4T5)",
            "Frequently",
            "Freeware",
            "macOS"
        ]
    );

    // BBEdit has no Signed by: line; Slack's license matched no keyword.
    assert_eq!(rows[1][1], Data::String("BBEdit".to_string()));
    assert_eq!(rows[1][3], Data::Empty);
    assert_eq!(rows[3][1], Data::String("Slack".to_string()));
    assert_eq!(rows[3][5], Data::Empty);
}

#[test]
fn e2e_fixture_to_json_omits_location() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("inventory.json");
    let options = PipelineOptions::new(fixture("installed_applications.txt"), &output, today());

    run(&options).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["Name"], "BBEdit");
    assert_eq!(rows[0]["Vendor"], serde_json::Value::Null);
    assert!(rows.iter().all(|r| r.get("location").is_none()));
}

// =============================================================================
// Two-block round trip
// =============================================================================

#[test]
fn e2e_two_block_report_keeps_only_installed_app() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.txt");
    let output = dir.path().join("out.csv");
    fs::write(
        &input,
        "AppOne:\n\
         Version: 2.0\n\
         Signed by: Developer ID Application: Jane Doe (ABCDE12345)\n\
         Last Modified: 1/1/24, 10:00\n\
         Obtained from: Free download\n\
         Location: /Applications/AppOne.app\n\
         \n\
         AppTwo:\n\
         Version: 1.0\n\
         Location: /Users/bob/Library/AppTwo.app\n",
    )
    .unwrap();

    let report = run(&PipelineOptions::new(&input, &output, today())).unwrap();
    assert_eq!(report.records_written, 1);

    let rows = read_csv(&output);
    assert_eq!(
        rows[1],
        row(&[
            "1",
            "AppOne",
            "2.0",
            "Jane Doe (ABCDE12345)",
            "Frequently",
            "Freeware",
            "macOS",
        ])
    );
    assert_eq!(rows.len(), 2);
}

#[test]
fn e2e_usage_depends_on_reference_date() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.txt");
    fs::write(
        &input,
        "AppOne:\nLast Modified: 1/1/24, 10:00\nLocation: /Applications/AppOne.app\n",
    )
    .unwrap();

    let used_on = |date: NaiveDate| {
        let output = dir.path().join(format!("{date}.csv"));
        run(&PipelineOptions::new(&input, &output, date)).unwrap();
        read_csv(&output)[1][4].clone()
    };

    assert_eq!(used_on(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()), "Frequently");
    assert_eq!(used_on(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()), "Occasionally");
    assert_eq!(used_on(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()), "Rarely");
}

// =============================================================================
// Failure modes
// =============================================================================

#[test]
fn e2e_missing_input_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.xlsx");
    let options = PipelineOptions::new(dir.path().join("absent.txt"), &output, today());

    let err = run(&options).unwrap_err();

    assert!(matches!(
        err,
        AppInventoryError::Input(InputError::NotFound { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn e2e_empty_input_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    let output = dir.path().join("out.csv");
    fs::write(&input, "").unwrap();
    fs::write(&output, "previous run").unwrap();

    let err = run(&PipelineOptions::new(&input, &output, today())).unwrap_err();

    assert!(matches!(
        err,
        AppInventoryError::Input(InputError::Empty { .. })
    ));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous run");
}

#[test]
fn e2e_unwritable_output_is_an_export_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("no-such-dir").join("out.csv");
    let options = PipelineOptions::new(fixture("installed_applications.txt"), &output, today());

    let err = run(&options).unwrap_err();

    assert!(matches!(err, AppInventoryError::Export(_)));
}

#[test]
fn e2e_malformed_order_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.txt");
    let output = dir.path().join("out.csv");
    fs::write(
        &input,
        "Location: /Applications/Ghost.app\nReal:\nLocation: /Applications/Real.app\n",
    )
    .unwrap();

    let report = run(&PipelineOptions::new(&input, &output, today())).unwrap();

    assert_eq!(report.records_written, 1);
    assert_eq!(report.warnings, 1);
    assert_eq!(read_csv(&output)[1][1], "Real");
}
