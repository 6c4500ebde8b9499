//! tradedash core — trade log store, derived metrics, filtering and summaries.
//!
//! Data flows one way, each stage producing a new value:
//! - `data`: CSV loading into a read-only `TradeStore`
//! - `metrics`: running max, drawdown, cumulative wins, running win rate
//! - `filter`: market/result predicates producing an ordered `FilteredView`
//! - `summary`: key metrics and per-market aggregates over a view
//! - `pipeline`: `Dashboard`, which ties the stages together per filter change

pub mod config;
pub mod data;
pub mod domain;
pub mod filter;
pub mod metrics;
pub mod pipeline;
pub mod summary;

pub use config::{ConfigError, DashConfig};
pub use data::{
    generate_sample, load_path, load_reader, load_workbook, write_trades_csv, InvalidResultPolicy,
    LoadError, LoadOptions, LoadReport, SampleConfig, TradeStore,
};
pub use domain::{DerivedPoint, DerivedSeries, TradeRecord, TradeResult};
pub use filter::{
    apply_filter, FilterError, FilterSpec, FilteredView, ResultFilter, SeriesMode, ViewRow,
};
pub use metrics::{derive_series, MetricsError};
pub use pipeline::{Dashboard, DashboardOptions, DashboardOutput, PipelineError};
pub use summary::{
    market_breakdown, most_traded_market, trades_per_market, win_rate_per_market, MarketBreakdown,
    SummaryMetrics,
};
