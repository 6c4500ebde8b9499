//! Test helpers for building app state over a small fixed log.

use tradedash_core::{Dashboard, DashboardOptions, TradeRecord, TradeResult, TradeStore};

use crate::app::AppState;

/// Four trades over M1, M2, M3: W L W L.
pub fn test_app() -> AppState {
    let store = TradeStore::from_records(vec![
        TradeRecord::new("M1", TradeResult::Win, 100.0),
        TradeRecord::new("M2", TradeResult::Loss, 90.0),
        TradeRecord::new("M1", TradeResult::Win, 110.0),
        TradeRecord::new("M3", TradeResult::Loss, 95.0),
    ]);
    let dashboard = Dashboard::new(store, DashboardOptions::default()).unwrap();
    let spec = dashboard.default_spec();
    AppState::new(dashboard, spec).unwrap()
}
