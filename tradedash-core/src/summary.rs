//! Summary aggregator — scalar key metrics and per-market aggregates over a view.
//!
//! An empty view is not an error. Every scalar that needs at least one row is
//! an `Option` and is `None` exactly when the view has no trades.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::filter::FilteredView;
use crate::metrics::{max_drawdown, running_winrate};

/// Scalar snapshot of a filtered view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_trades: usize,
    /// Percent of trades in the view that are WINs.
    pub win_rate: Option<f64>,
    /// Balance of the last row in view order.
    pub final_balance: Option<f64>,
    /// Highest-frequency market. Ties go to the market that appears first in the view.
    pub most_traded_market: Option<String>,
    /// Minimum of the drawdown column (most negative is worst).
    pub max_drawdown: Option<f64>,
}

impl SummaryMetrics {
    /// Compute all key metrics from a view.
    pub fn compute(view: &FilteredView) -> Self {
        Self::from_breakdown(view, &market_breakdown(view))
    }

    /// Key metrics for a view whose `market_breakdown` is already known.
    pub fn from_breakdown(view: &FilteredView, breakdown: &[MarketBreakdown]) -> Self {
        if view.is_empty() {
            return Self::default();
        }
        let total_trades = view.len();
        let wins = view.rows.iter().filter(|r| r.record.is_winner()).count();
        Self {
            total_trades,
            win_rate: Some(running_winrate(wins, total_trades)),
            final_balance: view.rows.last().map(|r| r.record.balance_after),
            most_traded_market: pick_most_traded(breakdown),
            max_drawdown: max_drawdown(&view.drawdowns()),
        }
    }

    /// True for the "no data" result of an empty view.
    pub fn is_empty(&self) -> bool {
        self.total_trades == 0
    }
}

/// Aggregates for one market within a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketBreakdown {
    pub market: String,
    pub trades: usize,
    pub wins: usize,
    /// Percent of this market's trades that are WINs.
    pub win_rate: f64,
    /// Percent of the view's trades that belong to this market.
    pub share: f64,
}

impl MarketBreakdown {
    fn empty(market: &str) -> Self {
        Self {
            market: market.to_string(),
            trades: 0,
            wins: 0,
            win_rate: 0.0,
            share: 0.0,
        }
    }
}

/// Per-market aggregates in order of first appearance in the view, in one pass.
pub fn market_breakdown(view: &FilteredView) -> Vec<MarketBreakdown> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<MarketBreakdown> = Vec::new();
    for row in &view.rows {
        let market = row.record.market.as_str();
        let idx = *index.entry(market).or_insert_with(|| {
            out.push(MarketBreakdown::empty(market));
            out.len() - 1
        });
        out[idx].trades += 1;
        if row.record.is_winner() {
            out[idx].wins += 1;
        }
    }
    let total = view.len();
    for b in &mut out {
        b.win_rate = running_winrate(b.wins, b.trades);
        b.share = b.trades as f64 / total as f64 * 100.0;
    }
    out
}

/// First entry whose count equals the maximum. `breakdown` must be in
/// first-appearance order.
fn pick_most_traded(breakdown: &[MarketBreakdown]) -> Option<String> {
    let mut best: Option<&MarketBreakdown> = None;
    for b in breakdown {
        if best.map_or(true, |cur| b.trades > cur.trades) {
            best = Some(b);
        }
    }
    best.map(|b| b.market.clone())
}

/// Stable sort by count descending, so ties keep first-appearance order.
pub(crate) fn sort_by_trade_count(mut breakdown: Vec<MarketBreakdown>) -> Vec<MarketBreakdown> {
    breakdown.sort_by(|a, b| b.trades.cmp(&a.trades));
    breakdown
}

pub(crate) fn sort_by_market_name(mut breakdown: Vec<MarketBreakdown>) -> Vec<MarketBreakdown> {
    breakdown.sort_by(|a, b| a.market.cmp(&b.market));
    breakdown
}

/// Most traded market: first market, in order of first appearance, whose count
/// equals the maximum.
pub fn most_traded_market(view: &FilteredView) -> Option<String> {
    pick_most_traded(&market_breakdown(view))
}

/// Trades per market, by count descending. Equal counts keep first-appearance order.
pub fn trades_per_market(view: &FilteredView) -> Vec<MarketBreakdown> {
    sort_by_trade_count(market_breakdown(view))
}

/// Win rate per market, by market name ascending.
pub fn win_rate_per_market(view: &FilteredView) -> Vec<MarketBreakdown> {
    sort_by_market_name(market_breakdown(view))
}
