//! Dashboard pipeline — store → derived series → filter → summary.
//!
//! `Dashboard` is the explicit, injected data context: it owns the read-only
//! store and the full-history series computed once at construction. Every
//! `compute` call runs filter and summary from scratch and touches nothing
//! it owns.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::TradeStore;
use crate::domain::DerivedSeries;
use crate::filter::{apply_filter, FilterError, FilterSpec, FilteredView, SeriesMode};
use crate::metrics::{derive_series, MetricsError};
use crate::summary::{
    market_breakdown, sort_by_market_name, sort_by_trade_count, MarketBreakdown, SummaryMetrics,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),
}

/// Options applied to every recompute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardOptions {
    pub series_mode: SeriesMode,
}

/// Everything the presentation layer needs for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOutput {
    pub spec: FilterSpec,
    pub view: FilteredView,
    pub summary: SummaryMetrics,
    /// Trade counts and shares, by count descending.
    pub per_market: Vec<MarketBreakdown>,
    /// Win rates, by market name.
    pub market_win_rates: Vec<MarketBreakdown>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    store: TradeStore,
    series: DerivedSeries,
    options: DashboardOptions,
}

impl Dashboard {
    /// Fails with `MetricsError::EmptyInput` for an empty store.
    pub fn new(store: TradeStore, options: DashboardOptions) -> Result<Self, PipelineError> {
        let series = derive_series(store.records())?;
        Ok(Self {
            store,
            series,
            options,
        })
    }

    pub fn store(&self) -> &TradeStore {
        &self.store
    }

    /// Full-history derived series, aligned with `store().records()`.
    pub fn series(&self) -> &DerivedSeries {
        &self.series
    }

    pub fn options(&self) -> DashboardOptions {
        self.options
    }

    pub fn set_series_mode(&mut self, mode: SeriesMode) {
        self.options.series_mode = mode;
    }

    /// Default filter: every market, all results.
    pub fn default_spec(&self) -> FilterSpec {
        FilterSpec::all(&self.store)
    }

    /// Run the full pipeline for one filter state.
    pub fn compute(&self, spec: &FilterSpec) -> Result<DashboardOutput, PipelineError> {
        spec.validate(&self.store)?;
        let view = apply_filter(
            self.store.records(),
            &self.series,
            spec,
            self.options.series_mode,
        );
        let breakdown = market_breakdown(&view);
        let summary = SummaryMetrics::from_breakdown(&view, &breakdown);
        let market_win_rates = sort_by_market_name(breakdown.clone());
        let per_market = sort_by_trade_count(breakdown);
        debug!(
            markets = spec.markets.len(),
            result = %spec.result,
            mode = %self.options.series_mode,
            rows = view.len(),
            "recomputed dashboard"
        );
        Ok(DashboardOutput {
            spec: spec.clone(),
            view,
            summary,
            per_market,
            market_win_rates,
        })
    }
}
