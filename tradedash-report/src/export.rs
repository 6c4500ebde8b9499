//! Reporting and export — JSON, CSV, and Markdown artifact generation.
//!
//! Persisted JSON carries a `schema_version` field. Newer versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tradedash_core::{
    Dashboard, DashboardOutput, FilterSpec, FilteredView, MarketBreakdown, ResultFilter,
    SeriesMode, SummaryMetrics,
};

use crate::format::{format_metric, format_percent};

/// Current schema version for persisted summaries.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Provenance of an export: which log, which mode, when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub source: Option<String>,
    pub dataset_hash: String,
    pub log_trades: usize,
    pub series_mode: SeriesMode,
    pub generated_at: String,
}

impl ReportMeta {
    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        let store = dashboard.store();
        Self {
            source: store.source().map(String::from),
            dataset_hash: store.dataset_hash().to_string(),
            log_trades: store.len(),
            series_mode: dashboard.options().series_mode,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// JSON document written by `export_summary_json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub meta: ReportMeta,
    pub filter: FilterSpec,
    pub summary: SummaryMetrics,
    pub per_market: Vec<MarketBreakdown>,
    pub market_win_rates: Vec<MarketBreakdown>,
}

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_summary_json(output: &DashboardOutput, meta: &ReportMeta) -> Result<String> {
    let doc = SummaryDocument {
        schema_version: SCHEMA_VERSION,
        meta: meta.clone(),
        filter: output.spec.clone(),
        summary: output.summary.clone(),
        per_market: output.per_market.clone(),
        market_win_rates: output.market_win_rates.clone(),
    };
    serde_json::to_string_pretty(&doc).context("failed to serialize summary to JSON")
}

pub fn import_summary_json(json: &str) -> Result<SummaryDocument> {
    let doc: SummaryDocument =
        serde_json::from_str(json).context("failed to deserialize summary JSON")?;
    if doc.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            doc.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(doc)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Filtered view with its derived columns, one row per trade.
///
/// Columns: trade_number, market, result, balance_after, running_max,
/// drawdown, cumulative_wins, running_winrate
pub fn export_view_csv(view: &FilteredView) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "trade_number",
        "market",
        "result",
        "balance_after",
        "running_max",
        "drawdown",
        "cumulative_wins",
        "running_winrate",
    ])?;
    for row in &view.rows {
        wtr.write_record([
            row.trade_number.to_string(),
            row.record.market.clone(),
            row.record.result.to_string(),
            format!("{:.2}", row.record.balance_after),
            format!("{:.2}", row.derived.running_max),
            format!("{:.2}", row.derived.drawdown),
            row.derived.cumulative_wins.to_string(),
            format!("{:.4}", row.derived.running_winrate),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Per-market aggregates: market, trades, wins, win_rate, share.
pub fn export_markets_csv(markets: &[MarketBreakdown]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["market", "trades", "wins", "win_rate", "share"])?;
    for m in markets {
        wtr.write_record([
            m.market.clone(),
            m.trades.to_string(),
            m.wins.to_string(),
            format!("{:.2}", m.win_rate),
            format!("{:.2}", m.share),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown report ────────────────────────────────────────────────

pub fn generate_report(output: &DashboardOutput, meta: &ReportMeta) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# Trading Performance Report\n\n");

    md.push_str("## Source\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!(
        "| Trade Log | {} |\n",
        meta.source.as_deref().unwrap_or("(in memory)")
    ));
    md.push_str(&format!("| Trades in Log | {} |\n", meta.log_trades));
    md.push_str(&format!("| Dataset Hash | {} |\n", meta.dataset_hash));
    md.push_str(&format!("| Series Mode | {} |\n", meta.series_mode));
    md.push_str(&format!("| Generated | {} |\n", meta.generated_at));
    md.push('\n');

    md.push_str("## Filters\n\n");
    md.push_str(&format!("- Markets: {}\n", describe_markets(&output.spec)));
    md.push_str(&format!("- Result: {}\n", describe_result(output.spec.result)));
    md.push('\n');

    md.push_str("## Key Metrics\n\n");
    let s = &output.summary;
    if s.is_empty() {
        md.push_str("No data for the current filter.\n");
        return md;
    }
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Total Trades | {} |\n", s.total_trades));
    md.push_str(&format!("| Winrate | {} |\n", format_percent(s.win_rate)));
    md.push_str(&format!("| Final Balance | {} |\n", format_metric(s.final_balance)));
    md.push_str(&format!(
        "| Most Traded Market | {} |\n",
        s.most_traded_market.as_deref().unwrap_or("no data")
    ));
    md.push_str(&format!("| Max Drawdown | {} |\n", format_metric(s.max_drawdown)));
    md.push('\n');

    md.push_str("## Trades Per Market\n\n");
    md.push_str("| Market | Trades | Share |\n");
    md.push_str("| --- | ---: | ---: |\n");
    for m in &output.per_market {
        md.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            m.market, m.trades, m.share
        ));
    }
    md.push('\n');

    md.push_str("## Winrate Per Market\n\n");
    md.push_str("| Market | Wins | Winrate |\n");
    md.push_str("| --- | ---: | ---: |\n");
    for m in &output.market_win_rates {
        md.push_str(&format!(
            "| {} | {}/{} | {:.2}% |\n",
            m.market, m.wins, m.trades, m.win_rate
        ));
    }

    md
}

fn describe_markets(spec: &FilterSpec) -> String {
    if spec.markets.is_empty() {
        "(none selected)".to_string()
    } else {
        spec.markets.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn describe_result(result: ResultFilter) -> &'static str {
    match result {
        ResultFilter::All => "All",
        ResultFilter::Win => "WIN only",
        ResultFilter::Loss => "LOSS only",
    }
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one filter state.
///
/// Creates `tradedash_{timestamp}/` under `output_dir` containing
/// `summary.json`, `view.csv`, `markets.csv` and `report.md`.
pub fn save_artifacts(
    output: &DashboardOutput,
    meta: &ReportMeta,
    output_dir: &Path,
) -> Result<PathBuf> {
    let dirname = format!(
        "tradedash_{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S_%3f")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_summary_json(output, meta)?;
    std::fs::write(run_dir.join("summary.json"), json)?;

    let view_csv = export_view_csv(&output.view)?;
    std::fs::write(run_dir.join("view.csv"), view_csv)?;

    let markets_csv = export_markets_csv(&output.per_market)?;
    std::fs::write(run_dir.join("markets.csv"), markets_csv)?;

    std::fs::write(run_dir.join("report.md"), generate_report(output, meta))?;

    Ok(run_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradedash_core::{DashboardOptions, TradeRecord, TradeResult, TradeStore};

    fn dashboard() -> Dashboard {
        let store = TradeStore::from_records(vec![
            TradeRecord::new("M1", TradeResult::Win, 100.0),
            TradeRecord::new("M1", TradeResult::Loss, 90.0),
            TradeRecord::new("M2", TradeResult::Win, 110.0),
        ]);
        Dashboard::new(store, DashboardOptions::default()).unwrap()
    }

    fn output(markets: &[&str]) -> (DashboardOutput, ReportMeta) {
        let d = dashboard();
        let spec = d.default_spec().with_markets(markets.iter().copied());
        (d.compute(&spec).unwrap(), ReportMeta::from_dashboard(&d))
    }

    // ─── JSON ───────────────────────────────────────────────────────

    #[test]
    fn summary_json_roundtrip() {
        let (out, meta) = output(&["M1"]);
        let json = export_summary_json(&out, &meta).unwrap();
        let doc = import_summary_json(&json).unwrap();
        assert_eq!(doc.schema_version, SCHEMA_VERSION);
        assert_eq!(doc.summary, out.summary);
        assert_eq!(doc.meta, meta);
        assert_eq!(doc.filter, out.spec);
    }

    #[test]
    fn newer_schema_is_rejected() {
        let (out, meta) = output(&["M1"]);
        let json = export_summary_json(&out, &meta).unwrap();
        let bumped = json.replace(
            &format!("\"schema_version\": {SCHEMA_VERSION}"),
            "\"schema_version\": 99",
        );
        let err = import_summary_json(&bumped).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version 99"));
    }

    #[test]
    fn empty_summary_serializes_nulls() {
        let (out, meta) = output(&[]);
        let json = export_summary_json(&out, &meta).unwrap();
        assert!(json.contains("\"win_rate\": null"));
        assert!(json.contains("\"total_trades\": 0"));
    }

    // ─── CSV ────────────────────────────────────────────────────────

    #[test]
    fn view_csv_has_header_and_rows() {
        let (out, _) = output(&["M1", "M2"]);
        let csv = export_view_csv(&out.view).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "trade_number,market,result,balance_after,running_max,drawdown,cumulative_wins,running_winrate"
        );
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "1,M1,LOSS,90.00,100.00,-10.00,1,50.0000");
    }

    #[test]
    fn markets_csv_lists_every_market() {
        let (out, _) = output(&["M1", "M2"]);
        let csv = export_markets_csv(&out.per_market).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "market,trades,wins,win_rate,share");
        assert_eq!(lines[1], "M1,2,1,50.00,66.67");
        assert_eq!(lines[2], "M2,1,1,100.00,33.33");
    }

    // ─── Markdown ───────────────────────────────────────────────────

    #[test]
    fn report_contains_key_metrics() {
        let (out, meta) = output(&["M1"]);
        let md = generate_report(&out, &meta);
        assert!(md.contains("# Trading Performance Report"));
        assert!(md.contains("| Total Trades | 2 |"));
        assert!(md.contains("| Winrate | 50.00% |"));
        assert!(md.contains("| Final Balance | 90.00 |"));
        assert!(md.contains("| Most Traded Market | M1 |"));
        assert!(md.contains("| Max Drawdown | -10.00 |"));
        assert!(md.contains("- Markets: M1"));
    }

    #[test]
    fn report_for_empty_view_says_no_data() {
        let (out, meta) = output(&[]);
        let md = generate_report(&out, &meta);
        assert!(md.contains("No data for the current filter."));
        assert!(md.contains("(none selected)"));
        assert!(!md.contains("## Trades Per Market"));
    }

    // ─── Bundle ─────────────────────────────────────────────────────

    #[test]
    fn save_artifacts_writes_bundle() {
        let (out, meta) = output(&["M1", "M2"]);
        let dir = tempfile::tempdir().unwrap();
        let run_dir = save_artifacts(&out, &meta, dir.path()).unwrap();

        assert!(run_dir.join("summary.json").exists());
        assert!(run_dir.join("view.csv").exists());
        assert!(run_dir.join("markets.csv").exists());
        assert!(run_dir.join("report.md").exists());

        let json = std::fs::read_to_string(run_dir.join("summary.json")).unwrap();
        let doc = import_summary_json(&json).unwrap();
        assert_eq!(doc.summary.total_trades, 3);
    }
}
