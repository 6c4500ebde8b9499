//! TradeStore — the immutable trade log, loaded once and shared read-only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::TradeRecord;

/// Counters collected while reading the source table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Data rows seen, including skipped ones.
    pub rows_read: usize,
    /// Rows dropped under the `skip` invalid-result policy.
    pub skipped_rows: usize,
    /// Rows counted as LOSS under the `loss` invalid-result policy.
    pub coerced_rows: usize,
}

/// Read-only trade log. Index position is the trade number.
///
/// There is no mutating API: once built, the sequence is never reordered or
/// appended to for the life of the process.
#[derive(Debug, Clone)]
pub struct TradeStore {
    records: Vec<TradeRecord>,
    report: LoadReport,
    source: Option<String>,
    dataset_hash: String,
    /// Distinct markets in order of first appearance.
    markets: Vec<String>,
    /// Trade count per entry of `markets`.
    counts: Vec<usize>,
    /// Market name to position in `markets`.
    market_index: HashMap<String, usize>,
}

impl TradeStore {
    /// Build a store from in-memory records (synthetic tables, tests).
    pub fn from_records(records: Vec<TradeRecord>) -> Self {
        let report = LoadReport {
            rows_read: records.len(),
            ..LoadReport::default()
        };
        Self::from_parts(records, report)
    }

    pub(crate) fn from_parts(records: Vec<TradeRecord>, report: LoadReport) -> Self {
        let dataset_hash = compute_dataset_hash(&records);
        let mut markets: Vec<String> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut market_index: HashMap<String, usize> = HashMap::new();
        for r in &records {
            match market_index.get(r.market.as_str()) {
                Some(&idx) => counts[idx] += 1,
                None => {
                    market_index.insert(r.market.clone(), markets.len());
                    markets.push(r.market.clone());
                    counts.push(1);
                }
            }
        }
        Self {
            records,
            report,
            source: None,
            dataset_hash,
            markets,
            counts,
            market_index,
        }
    }

    pub(crate) fn with_source(mut self, source: String) -> Self {
        self.source = Some(source);
        self
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Where the log came from (file path), if it was loaded from disk.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// BLAKE3 hex digest over every record, in order.
    pub fn dataset_hash(&self) -> &str {
        &self.dataset_hash
    }

    /// Distinct markets in order of first appearance.
    pub fn markets(&self) -> &[String] {
        &self.markets
    }

    /// Trade count per market, in order of first appearance.
    pub fn market_counts(&self) -> Vec<(&str, usize)> {
        self.markets
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
            .collect()
    }

    pub fn contains_market(&self, market: &str) -> bool {
        self.market_index.contains_key(market)
    }
}

/// Deterministic hash over the ordered trade log.
fn compute_dataset_hash(records: &[TradeRecord]) -> String {
    let mut hasher = blake3::Hasher::new();
    for r in records {
        hasher.update(r.market.as_bytes());
        hasher.update(&[0]);
        hasher.update(r.result.as_str().as_bytes());
        hasher.update(&r.balance_after.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TradeResult;

    fn sample() -> TradeStore {
        TradeStore::from_records(vec![
            TradeRecord::new("M2", TradeResult::Win, 100.0),
            TradeRecord::new("M1", TradeResult::Loss, 90.0),
            TradeRecord::new("M2", TradeResult::Win, 110.0),
        ])
    }

    #[test]
    fn markets_in_first_appearance_order() {
        let store = sample();
        assert_eq!(store.markets(), vec!["M2", "M1"]);
        assert_eq!(store.market_counts(), vec![("M2", 2), ("M1", 1)]);
        assert!(store.contains_market("M1"));
        assert!(!store.contains_market("M3"));
    }

    #[test]
    fn market_index_covers_every_distinct_market() {
        let records: Vec<TradeRecord> = (0..5_000)
            .map(|i| TradeRecord::new(format!("MKT{}", i % 2_500), TradeResult::Win, i as f64))
            .collect();
        let store = TradeStore::from_records(records);
        assert_eq!(store.markets().len(), 2_500);
        assert_eq!(store.markets()[0], "MKT0");
        assert!(store.market_counts().iter().all(|&(_, n)| n == 2));
        assert!(store.contains_market("MKT2499"));
        assert!(!store.contains_market("MKT2500"));
    }

    #[test]
    fn hash_is_deterministic_and_order_sensitive() {
        let a = sample();
        let b = sample();
        assert_eq!(a.dataset_hash(), b.dataset_hash());
        assert_eq!(a.dataset_hash().len(), 64);

        let mut reversed = a.records().to_vec();
        reversed.reverse();
        let c = TradeStore::from_records(reversed);
        assert_ne!(a.dataset_hash(), c.dataset_hash());
    }

    #[test]
    fn in_memory_store_has_no_source() {
        let store = sample();
        assert_eq!(store.source(), None);
        assert_eq!(store.report().rows_read, 3);
        assert_eq!(store.report().skipped_rows, 0);
    }
}
