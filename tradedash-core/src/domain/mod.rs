//! Domain types: trade records, trade results, and the derived series aligned to them.

pub mod series;
pub mod trade;

pub use series::{DerivedPoint, DerivedSeries};
pub use trade::{ParseResultError, TradeRecord, TradeResult};
