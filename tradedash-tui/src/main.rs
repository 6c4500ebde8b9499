//! tradedash TUI — interactive trading performance dashboard.
//!
//! Loads a trade log (or a synthetic sample when none is given), then
//! redraws the metrics and charts on every filter change.

use std::fs::File;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tradedash_core::{generate_sample, load_path, Dashboard, DashConfig, SampleConfig, TradeStore};
use tradedash_tui::{handle_key, ui, AppState};

#[derive(Parser)]
#[command(name = "tradedash-tui", about = "Trading performance dashboard")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trade log CSV or .xlsx workbook (overrides `[data] path`). Without one, a synthetic sample is shown.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write logs to this file. The terminal is owned by the UI, so nothing is logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => DashConfig::from_file(path)?,
        None => DashConfig::default(),
    };
    if let Some(input) = cli.input {
        config.data.path = Some(input);
    }

    let (store, sample) = match &config.data.path {
        Some(path) => (
            load_path(path, &config.load_options())
                .with_context(|| format!("failed to load trade log {}", path.display()))?,
            false,
        ),
        None => (
            TradeStore::from_records(generate_sample(&SampleConfig::default())),
            true,
        ),
    };
    info!(trades = store.len(), hash = store.dataset_hash(), "trade log ready");

    let skipped = store.report().skipped_rows + store.report().coerced_rows;
    let dashboard = Dashboard::new(store, config.dashboard_options())?;
    let spec = config.initial_spec(dashboard.store());
    let mut app = AppState::new(dashboard, spec)?;
    if sample {
        app.set_status("No --input given: showing synthetic sample data");
    } else if skipped > 0 {
        app.set_warning(format!(
            "{skipped} rows had invalid Result values (skipped or coerced)"
        ));
    }

    // Restore the terminal before the default hook prints the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn init_file_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms poll, ~20 FPS.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
