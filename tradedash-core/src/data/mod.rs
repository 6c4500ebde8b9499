//! Trade log ingestion: CSV and workbook loading, the read-only store, and synthetic samples.

pub mod loader;
pub mod sample;
pub mod store;
pub mod workbook;

pub use loader::{
    load_path, load_reader, write_trades_csv, InvalidResultPolicy, LoadError, LoadOptions,
    COL_BALANCE_AFTER, COL_MARKET, COL_RESULT,
};
pub use sample::{generate_sample, SampleConfig};
pub use store::{LoadReport, TradeStore};
pub use workbook::load_workbook;
