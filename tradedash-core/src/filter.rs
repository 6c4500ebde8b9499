//! Filter engine — selects a subsequence of the trade log.
//!
//! Filtering never resorts: the view is exactly the rows of the full table that
//! satisfy the predicate, in their original order. Each row keeps its trade
//! number (index in the full log) so charts can plot by position.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::data::TradeStore;
use crate::domain::{DerivedPoint, DerivedSeries, TradeRecord, TradeResult};
use crate::metrics::derive_series;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("market '{0}' does not appear in the trade log")]
    UnknownMarket(String),
}

/// Result-type predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultFilter {
    #[default]
    All,
    Win,
    Loss,
}

impl ResultFilter {
    pub fn matches(self, result: TradeResult) -> bool {
        match self {
            ResultFilter::All => true,
            ResultFilter::Win => result == TradeResult::Win,
            ResultFilter::Loss => result == TradeResult::Loss,
        }
    }

    /// All -> WIN -> LOSS -> All.
    pub fn next(self) -> Self {
        match self {
            ResultFilter::All => ResultFilter::Win,
            ResultFilter::Win => ResultFilter::Loss,
            ResultFilter::Loss => ResultFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResultFilter::All => "All",
            ResultFilter::Win => "WIN",
            ResultFilter::Loss => "LOSS",
        }
    }
}

impl fmt::Display for ResultFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown result filter '{0}' (expected all, win or loss)")]
pub struct ParseResultFilterError(pub String);

impl FromStr for ResultFilter {
    type Err = ParseResultFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ResultFilter::All),
            "win" => Ok(ResultFilter::Win),
            "loss" => Ok(ResultFilter::Loss),
            _ => Err(ParseResultFilterError(s.to_string())),
        }
    }
}

/// How derived values are attached to the filtered rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMode {
    /// Carry the values computed over the full history. A row's drawdown and
    /// win rate reflect its position in the whole log.
    #[default]
    FullHistory,
    /// Recompute the series over the filtered subsequence only.
    Rebased,
}

impl SeriesMode {
    pub fn toggle(self) -> Self {
        match self {
            SeriesMode::FullHistory => SeriesMode::Rebased,
            SeriesMode::Rebased => SeriesMode::FullHistory,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeriesMode::FullHistory => "full_history",
            SeriesMode::Rebased => "rebased",
        }
    }
}

impl fmt::Display for SeriesMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown series mode '{0}' (expected full_history or rebased)")]
pub struct ParseSeriesModeError(pub String);

impl FromStr for SeriesMode {
    type Err = ParseSeriesModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "full_history" | "full" => Ok(SeriesMode::FullHistory),
            "rebased" => Ok(SeriesMode::Rebased),
            _ => Err(ParseSeriesModeError(s.to_string())),
        }
    }
}

/// User-chosen subset criteria. Built fresh on every interaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    pub markets: BTreeSet<String>,
    pub result: ResultFilter,
}

impl FilterSpec {
    /// Every market in the store, all results.
    pub fn all(store: &TradeStore) -> Self {
        Self {
            markets: store.markets().iter().cloned().collect(),
            result: ResultFilter::All,
        }
    }

    pub fn with_markets<I, S>(mut self, markets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markets = markets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_result(mut self, result: ResultFilter) -> Self {
        self.result = result;
        self
    }

    /// Every selected market must exist in the store. An empty selection is valid.
    pub fn validate(&self, store: &TradeStore) -> Result<(), FilterError> {
        match self.markets.iter().find(|m| !store.contains_market(m)) {
            Some(unknown) => Err(FilterError::UnknownMarket(unknown.clone())),
            None => Ok(()),
        }
    }

    pub fn matches(&self, record: &TradeRecord) -> bool {
        self.markets.contains(&record.market) && self.result.matches(record.result)
    }
}

/// One row of the filtered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    /// Zero-based index in the full trade log.
    pub trade_number: usize,
    pub record: TradeRecord,
    pub derived: DerivedPoint,
}

/// Ordered subsequence of the trade log with aligned derived values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilteredView {
    pub rows: Vec<ViewRow>,
    pub mode: SeriesMode,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn trade_numbers(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.trade_number).collect()
    }

    pub fn balances(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.record.balance_after).collect()
    }

    pub fn drawdowns(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.derived.drawdown).collect()
    }

    pub fn running_winrates(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.derived.running_winrate).collect()
    }

    /// `(trade_number, value)` pairs, ready for an x/y chart.
    pub fn points(&self, value: impl Fn(&ViewRow) -> f64) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .map(|r| (r.trade_number as f64, value(r)))
            .collect()
    }
}

/// Apply `spec` to the full table.
///
/// `series` must be the derived series of `trades` (same length). `spec` is
/// not validated here; unknown markets simply match nothing.
pub fn apply_filter(
    trades: &[TradeRecord],
    series: &DerivedSeries,
    spec: &FilterSpec,
    mode: SeriesMode,
) -> FilteredView {
    debug_assert_eq!(trades.len(), series.len());

    let selected: Vec<(usize, &TradeRecord)> = trades
        .iter()
        .enumerate()
        .filter(|(_, t)| spec.matches(t))
        .collect();

    let rows = match mode {
        SeriesMode::FullHistory => selected
            .into_iter()
            .filter_map(|(i, t)| {
                series.point(i).map(|derived| ViewRow {
                    trade_number: i,
                    record: t.clone(),
                    derived,
                })
            })
            .collect(),
        SeriesMode::Rebased => {
            let subset: Vec<TradeRecord> = selected.iter().map(|(_, t)| (*t).clone()).collect();
            match derive_series(&subset) {
                Ok(rebased) => selected
                    .into_iter()
                    .zip(subset)
                    .zip(rebased.iter())
                    .map(|(((i, _), record), derived)| ViewRow {
                        trade_number: i,
                        record,
                        derived,
                    })
                    .collect(),
                // Empty subset.
                Err(_) => Vec::new(),
            }
        }
    };

    FilteredView { rows, mode }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> (Vec<TradeRecord>, DerivedSeries) {
        let trades = vec![
            TradeRecord::new("M1", TradeResult::Win, 100.0),
            TradeRecord::new("M1", TradeResult::Loss, 90.0),
            TradeRecord::new("M2", TradeResult::Win, 110.0),
            TradeRecord::new("M2", TradeResult::Loss, 95.0),
            TradeRecord::new("M1", TradeResult::Win, 120.0),
        ];
        let series = derive_series(&trades).unwrap();
        (trades, series)
    }

    fn spec(markets: &[&str], result: ResultFilter) -> FilterSpec {
        FilterSpec::default()
            .with_markets(markets.iter().copied())
            .with_result(result)
    }

    #[test]
    fn market_filter_keeps_order() {
        let (trades, series) = table();
        let view = apply_filter(&trades, &series, &spec(&["M1"], ResultFilter::All), SeriesMode::FullHistory);
        assert_eq!(view.trade_numbers(), vec![0, 1, 4]);
        assert_eq!(view.balances(), vec![100.0, 90.0, 120.0]);
    }

    #[test]
    fn result_filter_narrows_further() {
        let (trades, series) = table();
        let view = apply_filter(
            &trades,
            &series,
            &spec(&["M1", "M2"], ResultFilter::Loss),
            SeriesMode::FullHistory,
        );
        assert_eq!(view.trade_numbers(), vec![1, 3]);
        assert!(view.rows.iter().all(|r| r.record.result == TradeResult::Loss));
    }

    #[test]
    fn empty_selection_is_empty_view() {
        let (trades, series) = table();
        let view = apply_filter(&trades, &series, &spec(&[], ResultFilter::All), SeriesMode::FullHistory);
        assert!(view.is_empty());
        let view = apply_filter(&trades, &series, &spec(&[], ResultFilter::All), SeriesMode::Rebased);
        assert!(view.is_empty());
    }

    #[test]
    fn full_history_carries_full_log_values() {
        let (trades, series) = table();
        let view = apply_filter(&trades, &series, &spec(&["M2"], ResultFilter::All), SeriesMode::FullHistory);
        // Trade 3 sits 15 below the full-history peak set by trade 2.
        assert_eq!(view.drawdowns(), vec![0.0, -15.0]);
        assert_eq!(view.rows[0].derived.cumulative_wins, 2);
        assert!((view.running_winrates()[0] - 66.666_666_666_666_67).abs() < 1e-9);
    }

    #[test]
    fn rebased_recomputes_over_subset() {
        let (trades, series) = table();
        let view = apply_filter(&trades, &series, &spec(&["M2"], ResultFilter::All), SeriesMode::Rebased);
        assert_eq!(view.mode, SeriesMode::Rebased);
        assert_eq!(view.trade_numbers(), vec![2, 3]);
        assert_eq!(view.rows[0].derived.cumulative_wins, 1);
        assert_eq!(view.running_winrates(), vec![100.0, 50.0]);
        assert_eq!(view.drawdowns(), vec![0.0, -15.0]);
    }

    #[test]
    fn validate_rejects_unknown_market() {
        let (trades, _) = table();
        let store = TradeStore::from_records(trades);
        assert!(spec(&["M1"], ResultFilter::All).validate(&store).is_ok());
        assert!(spec(&[], ResultFilter::All).validate(&store).is_ok());
        assert_eq!(
            spec(&["M1", "XX"], ResultFilter::All).validate(&store),
            Err(FilterError::UnknownMarket("XX".into()))
        );
    }

    #[test]
    fn default_spec_from_store_selects_everything() {
        let (trades, series) = table();
        let store = TradeStore::from_records(trades.clone());
        let all = FilterSpec::all(&store);
        assert_eq!(all.markets.len(), 2);
        assert_eq!(all.result, ResultFilter::All);
        let view = apply_filter(&trades, &series, &all, SeriesMode::FullHistory);
        assert_eq!(view.len(), trades.len());
    }

    #[test]
    fn points_use_trade_number_as_x() {
        let (trades, series) = table();
        let view = apply_filter(&trades, &series, &spec(&["M2"], ResultFilter::All), SeriesMode::FullHistory);
        assert_eq!(view.points(|r| r.record.balance_after), vec![(2.0, 110.0), (3.0, 95.0)]);
    }

    #[test]
    fn result_filter_parsing_and_cycle() {
        assert_eq!("WIN".parse::<ResultFilter>().unwrap(), ResultFilter::Win);
        assert_eq!("all".parse::<ResultFilter>().unwrap(), ResultFilter::All);
        assert!("draw".parse::<ResultFilter>().is_err());
        assert_eq!(ResultFilter::All.next().next().next(), ResultFilter::All);
        assert!(ResultFilter::All.matches(TradeResult::Loss));
        assert!(!ResultFilter::Win.matches(TradeResult::Loss));
    }

    #[test]
    fn series_mode_parsing() {
        assert_eq!("full-history".parse::<SeriesMode>().unwrap(), SeriesMode::FullHistory);
        assert_eq!("rebased".parse::<SeriesMode>().unwrap(), SeriesMode::Rebased);
        assert!("partial".parse::<SeriesMode>().is_err());
        assert_eq!(SeriesMode::FullHistory.toggle(), SeriesMode::Rebased);
    }
}
