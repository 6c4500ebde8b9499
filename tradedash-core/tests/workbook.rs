//! Workbook input: `.xlsx` trade logs go through the same row rules as CSV.

use std::path::PathBuf;
use tradedash_core::{
    load_path, Dashboard, DashboardOptions, FilterSpec, InvalidResultPolicy, LoadError,
    LoadOptions, TradeRecord, TradeResult,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn with_policy(policy: InvalidResultPolicy) -> LoadOptions {
    LoadOptions {
        invalid_result: policy,
    }
}

#[test]
fn worked_example_from_xlsx() {
    let path = fixture("trades_database.xlsx");
    let store = load_path(&path, &LoadOptions::default()).unwrap();

    assert_eq!(
        store.records(),
        &[
            TradeRecord::new("M1", TradeResult::Win, 100.0),
            TradeRecord::new("M1", TradeResult::Loss, 90.0),
            TradeRecord::new("M2", TradeResult::Win, 110.0),
        ]
    );
    // The blank spreadsheet row between trades is not a data row.
    assert_eq!(store.report().rows_read, 3);
    assert_eq!(store.source(), Some(path.display().to_string().as_str()));

    let d = Dashboard::new(store, DashboardOptions::default()).unwrap();
    assert_eq!(d.series().drawdown, vec![0.0, -10.0, 0.0]);
    let out = d.compute(&FilterSpec::default().with_markets(["M1"])).unwrap();
    assert_eq!(out.summary.total_trades, 2);
    assert_eq!(out.summary.final_balance, Some(90.0));
    assert_eq!(out.summary.max_drawdown, Some(-10.0));
}

#[test]
fn xlsx_and_csv_hash_the_same() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("trades.csv");
    std::fs::write(&csv, "Market,Result,Balance_After\nM1,WIN,100\nM1,LOSS,90\nM2,WIN,110\n")
        .unwrap();

    let from_csv = load_path(&csv, &LoadOptions::default()).unwrap();
    let from_xlsx = load_path(&fixture("trades_database.xlsx"), &LoadOptions::default()).unwrap();
    assert_eq!(from_csv.dataset_hash(), from_xlsx.dataset_hash());
}

#[test]
fn invalid_result_in_xlsx_rejected_by_default() {
    let err = load_path(&fixture("invalid_result.xlsx"), &LoadOptions::default()).unwrap_err();
    match err {
        LoadError::InvalidResult { row, value } => {
            assert_eq!(row, 2);
            assert_eq!(value, "DRAW");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_result_in_xlsx_skipped() {
    let path = fixture("invalid_result.xlsx");
    let store = load_path(&path, &with_policy(InvalidResultPolicy::Skip)).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.report().skipped_rows, 1);
    assert_eq!(store.records()[1], TradeRecord::new("M2", TradeResult::Loss, 92.25));
}

#[test]
fn invalid_result_in_xlsx_counted_as_loss() {
    let path = fixture("invalid_result.xlsx");
    let store = load_path(&path, &with_policy(InvalidResultPolicy::Loss)).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.report().coerced_rows, 1);
    assert_eq!(store.records()[1], TradeRecord::new("M1", TradeResult::Loss, 95.5));
}

#[test]
fn xlsx_missing_column_aborts_load() {
    let err = load_path(&fixture("no_balance.xlsx"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Balance_After"));
}

#[test]
fn uppercase_extension_is_still_a_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("TRADES.XLSX");
    std::fs::copy(fixture("trades_database.xlsx"), &path).unwrap();
    let store = load_path(&path, &LoadOptions::default()).unwrap();
    assert_eq!(store.len(), 3);
}
