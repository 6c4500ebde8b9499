//! Spreadsheet input. The first worksheet holds the trade log, with the
//! header in its first row; blank rows are ignored.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use std::path::Path;

use super::loader::{Columns, LoadError, LoadOptions, RecordBuilder, COL_MARKET};
use super::store::TradeStore;

pub(super) const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load the trade log from the first worksheet of a workbook file.
pub fn load_workbook(path: &Path, opts: &LoadOptions) -> Result<TradeStore, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let workbook_err = |source: calamine::Error| LoadError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(workbook_err)?;
    let range = match sheets.worksheet_range_at(0) {
        Some(range) => range.map_err(workbook_err)?,
        // No sheet means no header row.
        None => return Err(LoadError::MissingColumn(COL_MARKET.to_string())),
    };

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_text).collect())
        .unwrap_or_default();
    let cols = Columns::locate(&headers)?;

    let mut builder = RecordBuilder::new(opts);
    for (i, row) in rows.enumerate() {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let field = |idx: usize| row.get(idx).map(cell_text).unwrap_or_default();
        builder.push(
            i + 1,
            &field(cols.market),
            &field(cols.result),
            &field(cols.balance_after),
        )?;
    }
    Ok(builder.finish().with_source(path.display().to_string()))
}

/// Cell contents as the text a CSV export would carry.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => format!("{other:?}"),
    }
}
