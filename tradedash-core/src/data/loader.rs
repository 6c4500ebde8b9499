//! Trade log loading from CSV files and spreadsheet workbooks.
//!
//! The source table must carry the `Market`, `Result` and `Balance_After`
//! columns; anything else is ignored. Row order is trade order and is kept
//! exactly as read. Every failure here is fatal: the caller gets a
//! `LoadError` and no store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

use super::store::{LoadReport, TradeStore};
use super::workbook::{load_workbook, WORKBOOK_EXTENSIONS};
use crate::domain::{TradeRecord, TradeResult};

pub const COL_MARKET: &str = "Market";
pub const COL_RESULT: &str = "Result";
pub const COL_BALANCE_AFTER: &str = "Balance_After";

/// Errors from the loading layer. Row numbers are 1-based data rows.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read trade log '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot read workbook '{path}': {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: balance '{value}' is not a finite number")]
    InvalidBalance { row: usize, value: String },

    #[error("row {row}: result '{value}' is neither WIN nor LOSS")]
    InvalidResult { row: usize, value: String },

    #[error("row {row}: market is empty")]
    EmptyMarket { row: usize },
}

/// What to do with a row whose `Result` is neither WIN nor LOSS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidResultPolicy {
    /// Fail the whole load.
    #[default]
    Reject,
    /// Drop the row and keep going.
    Skip,
    /// Count the row as a LOSS.
    Loss,
}

impl fmt::Display for InvalidResultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvalidResultPolicy::Reject => "reject",
            InvalidResultPolicy::Skip => "skip",
            InvalidResultPolicy::Loss => "loss",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown invalid-result policy '{0}' (expected reject, skip or loss)")]
pub struct ParsePolicyError(pub String);

impl FromStr for InvalidResultPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(InvalidResultPolicy::Reject),
            "skip" => Ok(InvalidResultPolicy::Skip),
            "loss" => Ok(InvalidResultPolicy::Loss),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Options controlling how the trade log is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub invalid_result: InvalidResultPolicy,
}

/// Load the trade log from a file. `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and
/// `.ods` files are read as workbooks; anything else as CSV.
pub fn load_path(path: &Path, opts: &LoadOptions) -> Result<TradeStore, LoadError> {
    if is_workbook(path) {
        return load_workbook(path, opts);
    }
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let store = load_reader(file, opts)?;
    Ok(store.with_source(path.display().to_string()))
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| WORKBOOK_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Load the trade log from any CSV reader.
pub fn load_reader<R: Read>(reader: R, opts: &LoadOptions) -> Result<TradeStore, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let cols = Columns::locate(&headers.iter().collect::<Vec<_>>())?;

    let mut builder = RecordBuilder::new(opts);
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        let field = |idx: usize| row.get(idx).unwrap_or_default();
        builder.push(
            i + 1,
            field(cols.market),
            field(cols.result),
            field(cols.balance_after),
        )?;
    }
    Ok(builder.finish())
}

/// Positions of the required columns in a header row.
#[derive(Debug, Clone, Copy)]
pub(super) struct Columns {
    pub market: usize,
    pub result: usize,
    pub balance_after: usize,
}

impl Columns {
    pub(super) fn locate<S: AsRef<str>>(headers: &[S]) -> Result<Self, LoadError> {
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.as_ref() == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            market: column(COL_MARKET)?,
            result: column(COL_RESULT)?,
            balance_after: column(COL_BALANCE_AFTER)?,
        })
    }
}

/// Turns raw row text into records, applying the invalid-result policy.
pub(super) struct RecordBuilder<'a> {
    opts: &'a LoadOptions,
    records: Vec<TradeRecord>,
    report: LoadReport,
}

impl<'a> RecordBuilder<'a> {
    pub(super) fn new(opts: &'a LoadOptions) -> Self {
        Self {
            opts,
            records: Vec::new(),
            report: LoadReport::default(),
        }
    }

    /// Convert one data row. `row_no` is 1-based. Fields arrive trimmed.
    pub(super) fn push(
        &mut self,
        row_no: usize,
        market: &str,
        raw_result: &str,
        raw_balance: &str,
    ) -> Result<(), LoadError> {
        self.report.rows_read += 1;

        if market.is_empty() {
            return Err(LoadError::EmptyMarket { row: row_no });
        }

        let balance_after = match raw_balance.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                return Err(LoadError::InvalidBalance {
                    row: row_no,
                    value: raw_balance.to_string(),
                })
            }
        };

        let result = match raw_result.parse::<TradeResult>() {
            Ok(r) => r,
            Err(_) => match self.opts.invalid_result {
                InvalidResultPolicy::Reject => {
                    return Err(LoadError::InvalidResult {
                        row: row_no,
                        value: raw_result.to_string(),
                    })
                }
                InvalidResultPolicy::Skip => {
                    warn!(row = row_no, value = raw_result, "skipping row with invalid result");
                    self.report.skipped_rows += 1;
                    return Ok(());
                }
                InvalidResultPolicy::Loss => {
                    warn!(row = row_no, value = raw_result, "counting invalid result as LOSS");
                    self.report.coerced_rows += 1;
                    TradeResult::Loss
                }
            },
        };

        self.records.push(TradeRecord::new(market, result, balance_after));
        Ok(())
    }

    pub(super) fn finish(self) -> TradeStore {
        let report = self.report;
        let store = TradeStore::from_parts(self.records, report);
        info!(
            trades = store.len(),
            skipped = report.skipped_rows,
            coerced = report.coerced_rows,
            hash = %store.dataset_hash(),
            "trade log loaded"
        );
        store
    }
}

/// Write trades as a CSV table with the three required columns.
pub fn write_trades_csv<W: Write>(writer: W, records: &[TradeRecord]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([COL_MARKET, COL_RESULT, COL_BALANCE_AFTER])?;
    for r in records {
        wtr.write_record([
            r.market.as_str(),
            r.result.as_str(),
            &format!("{:.2}", r.balance_after),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
