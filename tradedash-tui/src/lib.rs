//! tradedash TUI — terminal view over a trade log.
//!
//! Layout:
//! - Filters sidebar: market multi-select, result selector, series mode
//! - Key metrics strip: trades, winrate, final balance, most traded, max drawdown
//! - Chart area: equity, running winrate, per-market counts and winrates, distribution

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::{AppState, ChartTab, StatusLevel};
pub use input::handle_key;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
