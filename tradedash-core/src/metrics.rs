//! Derived metrics engine — prefix scans over the ordered trade log.
//!
//! Pure functions: same input order and values, bit-identical output.

use thiserror::Error;

use crate::domain::{DerivedPoint, DerivedSeries, TradeRecord};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("trade log is empty: running metrics are undefined for zero trades")]
    EmptyInput,

    #[error("trade {index}: balance is not a finite number")]
    NonFiniteBalance { index: usize },
}

/// Compute the derived series for an ordered, non-empty trade sequence.
///
/// Single pass: `running_max[i] = max(running_max[i-1], balance[i])`,
/// `drawdown[i] = balance[i] - running_max[i]`, `cumulative_wins[i]` counts
/// WINs in `0..=i`, and `running_winrate[i] = cumulative_wins[i] / (i + 1) * 100`.
pub fn derive_series(trades: &[TradeRecord]) -> Result<DerivedSeries, MetricsError> {
    if trades.is_empty() {
        return Err(MetricsError::EmptyInput);
    }

    let mut series = DerivedSeries::with_capacity(trades.len());
    let mut peak = f64::NEG_INFINITY;
    let mut wins = 0usize;

    for (i, trade) in trades.iter().enumerate() {
        let balance = trade.balance_after;
        if !balance.is_finite() {
            return Err(MetricsError::NonFiniteBalance { index: i });
        }
        if balance > peak {
            peak = balance;
        }
        if trade.is_winner() {
            wins += 1;
        }
        series.push(DerivedPoint {
            running_max: peak,
            drawdown: balance - peak,
            cumulative_wins: wins,
            running_winrate: running_winrate(wins, i + 1),
        });
    }

    Ok(series)
}

/// Win percentage over `count` trades. Zero trades gives 0.0.
pub fn running_winrate(wins: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    wins as f64 / count as f64 * 100.0
}

/// Most negative value of a drawdown column, or `None` when empty.
pub fn max_drawdown(drawdowns: &[f64]) -> Option<f64> {
    drawdowns.iter().copied().reduce(f64::min)
}
