//! Display formatting shared by the report, CLI and TUI.

/// Round to two decimals, or "no data" when absent.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "no data".to_string(),
    }
}

/// Two-decimal percentage with a trailing `%`, or "no data".
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "no data".to_string(),
    }
}
