//! tradedash report — exports of pipeline outputs for external tools.
//!
//! - **CSV**: the filtered view with its derived columns, and per-market aggregates
//! - **JSON**: the key-metrics bundle with schema versioning
//! - **Markdown**: a human-readable single-view report

pub mod export;
pub mod format;

pub use export::{
    export_markets_csv, export_summary_json, export_view_csv, generate_report,
    import_summary_json, save_artifacts, ReportMeta, SummaryDocument, SCHEMA_VERSION,
};
pub use format::{format_metric, format_percent};
