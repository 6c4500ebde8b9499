//! Synthetic trade logs for demos and benchmarks.
//!
//! A seeded random walk over the account balance: each trade picks a market
//! uniformly, wins with a fixed probability, and moves the balance by a
//! fixed fraction of itself. Same config, same log.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{TradeRecord, TradeResult};

#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub rows: usize,
    pub markets: Vec<String>,
    pub seed: u64,
    pub start_balance: f64,
    /// Probability of a WIN, in [0, 1].
    pub win_probability: f64,
    /// Fraction of balance risked per trade.
    pub risk_fraction: f64,
    /// Gain on a win, as a multiple of the risked amount.
    pub reward_ratio: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            rows: 200,
            markets: ["EURUSD", "GBPUSD", "XAUUSD", "US30"]
                .into_iter()
                .map(String::from)
                .collect(),
            seed: 42,
            start_balance: 10_000.0,
            win_probability: 0.5,
            risk_fraction: 0.01,
            reward_ratio: 1.5,
        }
    }
}

/// Generate a synthetic trade log. Returns an empty log when `markets` is empty.
pub fn generate_sample(config: &SampleConfig) -> Vec<TradeRecord> {
    if config.markets.is_empty() {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(config.seed);
    let p = config.win_probability.clamp(0.0, 1.0);
    let mut balance = config.start_balance;
    let mut out = Vec::with_capacity(config.rows);

    for _ in 0..config.rows {
        let market = &config.markets[rng.gen_range(0..config.markets.len())];
        let risk = balance * config.risk_fraction;
        let result = if rng.gen_bool(p) {
            balance += risk * config.reward_ratio;
            TradeResult::Win
        } else {
            balance -= risk;
            TradeResult::Loss
        };
        balance = (balance * 100.0).round() / 100.0;
        out.push(TradeRecord::new(market.clone(), result, balance));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_deterministic() {
        let cfg = SampleConfig::default();
        assert_eq!(generate_sample(&cfg), generate_sample(&cfg));
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate_sample(&SampleConfig::default());
        let b = generate_sample(&SampleConfig {
            seed: 7,
            ..SampleConfig::default()
        });
        assert_ne!(a, b);
    }

    #[test]
    fn balance_moves_with_result() {
        let cfg = SampleConfig {
            rows: 50,
            ..SampleConfig::default()
        };
        let trades = generate_sample(&cfg);
        assert_eq!(trades.len(), 50);
        let mut prev = cfg.start_balance;
        for t in &trades {
            match t.result {
                TradeResult::Win => assert!(t.balance_after >= prev),
                TradeResult::Loss => assert!(t.balance_after <= prev),
            }
            assert!(cfg.markets.contains(&t.market));
            prev = t.balance_after;
        }
    }

    #[test]
    fn always_winning_sample() {
        let trades = generate_sample(&SampleConfig {
            rows: 10,
            win_probability: 1.0,
            ..SampleConfig::default()
        });
        assert!(trades.iter().all(|t| t.is_winner()));
    }

    #[test]
    fn no_markets_no_trades() {
        let trades = generate_sample(&SampleConfig {
            markets: vec![],
            ..SampleConfig::default()
        });
        assert!(trades.is_empty());
    }
}
