//! Application state — single-owner, main-thread only.
//!
//! Every filter change rebuilds the `DashboardOutput` from scratch through
//! `Dashboard::compute`. Nothing is updated incrementally.

use tracing::{debug, warn};
use tradedash_core::{Dashboard, DashboardOutput, FilterSpec, PipelineError};

use crate::theme::Theme;

/// Which chart fills the chart area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartTab {
    #[default]
    Equity,
    Winrate,
    TradesPerMarket,
    WinratePerMarket,
    Distribution,
}

impl ChartTab {
    pub const COUNT: usize = 5;

    pub fn index(self) -> usize {
        match self {
            ChartTab::Equity => 0,
            ChartTab::Winrate => 1,
            ChartTab::TradesPerMarket => 2,
            ChartTab::WinratePerMarket => 3,
            ChartTab::Distribution => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(ChartTab::Equity),
            1 => Some(ChartTab::Winrate),
            2 => Some(ChartTab::TradesPerMarket),
            3 => Some(ChartTab::WinratePerMarket),
            4 => Some(ChartTab::Distribution),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartTab::Equity => "Equity Curve",
            ChartTab::Winrate => "Running Winrate",
            ChartTab::TradesPerMarket => "Trades Per Market",
            ChartTab::WinratePerMarket => "Winrate Per Market",
            ChartTab::Distribution => "Market Distribution",
        }
    }

    pub fn next(self) -> ChartTab {
        Self::from_index((self.index() + 1) % Self::COUNT).unwrap_or_default()
    }

    pub fn prev(self) -> ChartTab {
        Self::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or_default()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

pub struct AppState {
    pub running: bool,
    pub dashboard: Dashboard,
    /// Every market in the log, in order of first appearance.
    pub markets: Vec<String>,
    /// Sidebar cursor into `markets`.
    pub cursor: usize,
    pub spec: FilterSpec,
    pub output: DashboardOutput,
    pub chart: ChartTab,
    pub status_message: Option<(String, StatusLevel)>,
    pub theme: Theme,
}

impl AppState {
    pub fn new(dashboard: Dashboard, spec: FilterSpec) -> Result<Self, PipelineError> {
        let output = dashboard.compute(&spec)?;
        let markets = dashboard.store().markets().to_vec();
        Ok(Self {
            running: true,
            dashboard,
            markets,
            cursor: 0,
            spec,
            output,
            chart: ChartTab::default(),
            status_message: None,
            theme: Theme::default(),
        })
    }

    /// Rebuild the cached output for the current filter.
    pub fn recompute(&mut self) {
        match self.dashboard.compute(&self.spec) {
            Ok(output) => {
                debug!(rows = output.view.len(), "view recomputed");
                self.output = output;
            }
            Err(e) => {
                warn!(error = %e, "recompute failed");
                self.set_error(e.to_string());
            }
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.markets.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn is_selected(&self, market: &str) -> bool {
        self.spec.markets.contains(market)
    }

    pub fn toggle_market_at_cursor(&mut self) {
        let Some(market) = self.markets.get(self.cursor).cloned() else {
            return;
        };
        if !self.spec.markets.remove(&market) {
            self.spec.markets.insert(market);
        }
        self.recompute();
    }

    pub fn select_all_markets(&mut self) {
        self.spec.markets = self.markets.iter().cloned().collect();
        self.recompute();
    }

    pub fn clear_markets(&mut self) {
        self.spec.markets.clear();
        self.recompute();
    }

    pub fn cycle_result(&mut self) {
        self.spec.result = self.spec.result.next();
        self.recompute();
    }

    pub fn toggle_series_mode(&mut self) {
        let mode = self.dashboard.options().series_mode.toggle();
        self.dashboard.set_series_mode(mode);
        self.recompute();
        self.set_status(format!("Series mode: {}", mode.label()));
    }
}
