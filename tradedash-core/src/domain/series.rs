//! DerivedSeries — prefix aggregates aligned index-for-index with the trade log.

use serde::{Deserialize, Serialize};

/// The derived values for a single trade index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoint {
    pub running_max: f64,
    pub drawdown: f64,
    pub cumulative_wins: usize,
    pub running_winrate: f64,
}

/// Column-oriented derived series. Every column has the same length as the
/// trade sequence it was computed from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub running_max: Vec<f64>,
    pub drawdown: Vec<f64>,
    pub cumulative_wins: Vec<usize>,
    pub running_winrate: Vec<f64>,
}

impl DerivedSeries {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            running_max: Vec::with_capacity(n),
            drawdown: Vec::with_capacity(n),
            cumulative_wins: Vec::with_capacity(n),
            running_winrate: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, point: DerivedPoint) {
        self.running_max.push(point.running_max);
        self.drawdown.push(point.drawdown);
        self.cumulative_wins.push(point.cumulative_wins);
        self.running_winrate.push(point.running_winrate);
    }

    pub fn len(&self) -> usize {
        self.running_max.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running_max.is_empty()
    }

    /// The derived values at trade index `i`, if in range.
    pub fn point(&self, i: usize) -> Option<DerivedPoint> {
        Some(DerivedPoint {
            running_max: *self.running_max.get(i)?,
            drawdown: *self.drawdown.get(i)?,
            cumulative_wins: *self.cumulative_wins.get(i)?,
            running_winrate: *self.running_winrate.get(i)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = DerivedPoint> + '_ {
        (0..self.len()).filter_map(move |i| self.point(i))
    }
}
