//! TOML configuration for the dashboard.
//!
//! ```toml
//! [data]
//! path = "trades.csv"
//! invalid_result = "reject"   # reject | skip | loss
//!
//! [view]
//! series_mode = "full_history" # full_history | rebased
//! result = "all"               # all | win | loss
//! markets = ["EURUSD"]         # omit for every market; [] selects none
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::{InvalidResultPolicy, LoadOptions, TradeStore};
use crate::filter::{FilterSpec, ResultFilter, SeriesMode};
use crate::pipeline::DashboardOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashConfig {
    pub data: DataSection,
    pub view: ViewSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataSection {
    /// Trade log: CSV, or a workbook by extension (`.xlsx`, `.xls`, ...).
    pub path: Option<PathBuf>,
    pub invalid_result: InvalidResultPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewSection {
    pub series_mode: SeriesMode,
    pub result: ResultFilter,
    /// Initial market selection. `None` means every market in the log;
    /// an empty list is an empty selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markets: Option<Vec<String>>,
}

impl DashConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            invalid_result: self.data.invalid_result,
        }
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            series_mode: self.view.series_mode,
        }
    }

    /// The starting filter for `store`.
    pub fn initial_spec(&self, store: &TradeStore) -> FilterSpec {
        let spec = FilterSpec::all(store).with_result(self.view.result);
        match &self.view.markets {
            Some(markets) => spec.with_markets(markets.iter().cloned()),
            None => spec,
        }
    }
}
