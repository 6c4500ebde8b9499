//! TradeRecord — one row of the trade log, converted once at load time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Outcome of a single trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeResult {
    Win,
    Loss,
}

impl TradeResult {
    pub fn is_win(self) -> bool {
        self == TradeResult::Win
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TradeResult::Win => "WIN",
            TradeResult::Loss => "LOSS",
        }
    }
}

impl fmt::Display for TradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("result must be WIN or LOSS, got '{0}'")]
pub struct ParseResultError(pub String);

impl FromStr for TradeResult {
    type Err = ParseResultError;

    /// Surrounding whitespace is ignored and matching is ASCII case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("WIN") {
            Ok(TradeResult::Win)
        } else if trimmed.eq_ignore_ascii_case("LOSS") {
            Ok(TradeResult::Loss)
        } else {
            Err(ParseResultError(s.to_string()))
        }
    }
}

/// A single closed trade: which market, how it ended, and the balance afterwards.
///
/// Position in the log is the trade number; the record itself carries no index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub market: String,
    pub result: TradeResult,
    pub balance_after: f64,
}

impl TradeRecord {
    pub fn new(market: impl Into<String>, result: TradeResult, balance_after: f64) -> Self {
        Self {
            market: market.into(),
            result,
            balance_after,
        }
    }

    pub fn is_winner(&self) -> bool {
        self.result.is_win()
    }
}
