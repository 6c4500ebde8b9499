//! tradedash CLI — trade log summaries, exports and sample data.
//!
//! Commands:
//! - `summary` — key metrics and per-market table for one filter state
//! - `markets` — distinct markets in a log with trade counts
//! - `export` — save summary.json, view.csv, markets.csv and report.md
//! - `sample` — write a deterministic synthetic trade log

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tradedash_core::{
    generate_sample, load_path, write_trades_csv, Dashboard, DashConfig, DashboardOutput,
    InvalidResultPolicy, ResultFilter, SampleConfig, SeriesMode,
};
use tradedash_report::{format_metric, format_percent, save_artifacts, ReportMeta};

#[derive(Parser)]
#[command(
    name = "tradedash",
    about = "tradedash CLI — trading performance metrics from a trade log"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print key metrics for the selected markets and result.
    Summary {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        view: ViewArgs,

        /// Print the full output as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List distinct markets with trade counts, most traded first.
    Markets {
        #[command(flatten)]
        data: DataArgs,
    },
    /// Save the artifact bundle for one filter state.
    Export {
        #[command(flatten)]
        data: DataArgs,

        #[command(flatten)]
        view: ViewArgs,

        /// Output directory for artifacts.
        #[arg(long, default_value = "reports")]
        output_dir: PathBuf,
    },
    /// Write a deterministic synthetic trade log.
    Sample {
        /// Destination CSV file.
        #[arg(long)]
        out: PathBuf,

        /// Number of trades.
        #[arg(long, default_value_t = 200)]
        rows: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Comma-separated market names.
        #[arg(long, value_delimiter = ',')]
        markets: Vec<String>,

        /// Starting account balance.
        #[arg(long, default_value_t = 10_000.0)]
        start_balance: f64,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trade log CSV or .xlsx workbook (overrides `[data] path`).
    #[arg(long)]
    input: Option<PathBuf>,

    /// What to do with rows whose Result is not WIN/LOSS: reject, skip, loss.
    #[arg(long)]
    invalid_result: Option<InvalidResultPolicy>,
}

#[derive(Args)]
struct ViewArgs {
    /// Market to include (repeatable or comma-separated). Defaults to the
    /// config selection, or every market.
    #[arg(long = "market", value_delimiter = ',')]
    markets: Vec<String>,

    /// Start from an empty market selection.
    #[arg(long, conflicts_with = "markets", default_value_t = false)]
    no_markets: bool,

    /// Result filter: all, win, loss.
    #[arg(long)]
    result: Option<ResultFilter>,

    /// Derived series mode: full-history, rebased.
    #[arg(long)]
    series_mode: Option<SeriesMode>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { data, view, json } => run_summary(data, view, json),
        Commands::Markets { data } => run_markets(data),
        Commands::Export {
            data,
            view,
            output_dir,
        } => run_export(data, view, output_dir),
        Commands::Sample {
            out,
            rows,
            seed,
            markets,
            start_balance,
        } => run_sample(out, rows, seed, markets, start_balance),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merge the config file with command-line overrides. Flags win.
fn resolve_config(data: &DataArgs, view: Option<&ViewArgs>) -> Result<DashConfig> {
    let mut config = match &data.config {
        Some(path) => DashConfig::from_file(path)?,
        None => DashConfig::default(),
    };

    if let Some(input) = &data.input {
        config.data.path = Some(input.clone());
    }
    if let Some(policy) = data.invalid_result {
        config.data.invalid_result = policy;
    }
    if let Some(view) = view {
        if view.no_markets {
            config.view.markets = Some(Vec::new());
        } else if !view.markets.is_empty() {
            config.view.markets = Some(view.markets.clone());
        }
        if let Some(result) = view.result {
            config.view.result = result;
        }
        if let Some(mode) = view.series_mode {
            config.view.series_mode = mode;
        }
    }
    Ok(config)
}

fn open_dashboard(config: &DashConfig) -> Result<Dashboard> {
    let Some(path) = &config.data.path else {
        bail!("no trade log given: pass --input or set [data] path in the config");
    };
    let store = load_path(path, &config.load_options())
        .with_context(|| format!("failed to load trade log {}", path.display()))?;

    let report = store.report();
    if report.skipped_rows > 0 || report.coerced_rows > 0 {
        eprintln!(
            "Note: {} rows skipped, {} rows coerced to LOSS (invalid Result values)",
            report.skipped_rows, report.coerced_rows
        );
    }

    Ok(Dashboard::new(store, config.dashboard_options())?)
}

fn compute(data: DataArgs, view: ViewArgs) -> Result<(Dashboard, DashboardOutput)> {
    let config = resolve_config(&data, Some(&view))?;
    let dashboard = open_dashboard(&config)?;
    let spec = config.initial_spec(dashboard.store());
    let output = dashboard.compute(&spec)?;
    Ok((dashboard, output))
}

fn run_summary(data: DataArgs, view: ViewArgs, json: bool) -> Result<()> {
    let (dashboard, output) = compute(data, view)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_summary(&dashboard, &output);
    Ok(())
}

fn run_markets(data: DataArgs) -> Result<()> {
    let config = resolve_config(&data, None)?;
    let dashboard = open_dashboard(&config)?;
    let mut counts = dashboard.store().market_counts();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    println!("{:<16} {:>8}", "Market", "Trades");
    for (market, count) in counts {
        println!("{market:<16} {count:>8}");
    }
    Ok(())
}

fn run_export(data: DataArgs, view: ViewArgs, output_dir: PathBuf) -> Result<()> {
    let (dashboard, output) = compute(data, view)?;
    let meta = ReportMeta::from_dashboard(&dashboard);
    let run_dir = save_artifacts(&output, &meta, &output_dir)?;
    info!(dir = %run_dir.display(), "saved artifacts");
    println!("Artifacts saved to: {}", run_dir.display());
    Ok(())
}

fn run_sample(
    out: PathBuf,
    rows: usize,
    seed: u64,
    markets: Vec<String>,
    start_balance: f64,
) -> Result<()> {
    let mut config = SampleConfig {
        rows,
        seed,
        start_balance,
        ..SampleConfig::default()
    };
    if !markets.is_empty() {
        config.markets = markets;
    }

    let trades = generate_sample(&config);
    let file =
        File::create(&out).with_context(|| format!("failed to create {}", out.display()))?;
    write_trades_csv(BufWriter::new(file), &trades)?;
    println!("Wrote {} trades to {}", trades.len(), out.display());
    Ok(())
}

fn print_summary(dashboard: &Dashboard, output: &DashboardOutput) {
    let store = dashboard.store();
    let summary = &output.summary;

    println!();
    println!("=== {} ===", store.source().unwrap_or("trade log"));
    println!(
        "Filter:          {} market(s), {} | {}",
        output.spec.markets.len(),
        output.spec.result.label(),
        dashboard.options().series_mode.label()
    );
    println!();

    if summary.is_empty() {
        println!("No data for the current filter");
        println!();
        return;
    }

    println!("Total Trades:    {}", summary.total_trades);
    println!("Winrate:         {}", format_percent(summary.win_rate));
    println!("Final Balance:   {}", format_metric(summary.final_balance));
    println!(
        "Most Traded:     {}",
        summary.most_traded_market.as_deref().unwrap_or("no data")
    );
    println!("Max Drawdown:    {}", format_metric(summary.max_drawdown));
    println!();

    println!(
        "{:<16} {:>8} {:>8} {:>10} {:>8}",
        "Market", "Trades", "Wins", "Winrate", "Share"
    );
    for m in &output.per_market {
        println!(
            "{:<16} {:>8} {:>8} {:>9.2}% {:>7.1}%",
            m.market, m.trades, m.wins, m.win_rate, m.share
        );
    }
    println!();
}
