// services/log-dash/src/main.rs
//
// Terminal dashboard for AI-enriched log search
//
// Run with: cargo run --bin log-dash -- --demo

use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use log_dash::api::{ApiClient, FetchDispatcher, LogSource};
use log_dash::config::{load_config, DashConfig};
use log_dash::mock::DemoLogSource;
use log_dash::state::{DashboardState, FetchOutcome};
use log_dash::view::{draw_ui, SourceMode};

/// Upper bound on how long the loop sleeps, so fetch results show up promptly
const FRAME: Duration = Duration::from_millis(100);
const PAGE: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "log-dash")]
#[command(about = "Terminal dashboard for searching AI-enriched logs")]
#[command(version = "0.1.0")]
struct Args {
    /// Configuration file (YAML, TOML or JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Run against simulated logs (no query API required)
    #[arg(long, short)]
    demo: bool,

    /// Log-query endpoint, overrides the configuration
    #[arg(long)]
    api_url: Option<String>,

    /// Directory for the dashboard's own log file
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(url) = args.api_url {
        config.api.endpoint = url;
    }
    if let Some(dir) = args.log_dir {
        config.observability.log_dir = dir;
    }

    let _guard = init_tracing(&config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    let (source, mode): (Arc<dyn LogSource>, SourceMode) = if args.demo {
        (Arc::new(DemoLogSource::new()), SourceMode::Demo)
    } else {
        let client = ApiClient::new(&config.api)?;
        let endpoint = client.describe();
        (Arc::new(client), SourceMode::Live(endpoint))
    };
    info!(mode = ?mode, "log-dash starting");

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Run app
    let result = run_app(&mut terminal, &config, source, &mode, runtime.handle().clone());

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    runtime.shutdown_timeout(Duration::from_millis(500));
    info!("log-dash stopped");

    result
}

fn init_tracing(config: &DashConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.observability.log_dir)
        .with_context(|| format!("failed to create log directory {}", config.observability.log_dir))?;

    // stdout belongs to the terminal UI, so logs only go to the file
    let file_appender = rolling::never(&config.observability.log_dir, "log-dash.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.observability.log_level))
        .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    Ok(guard)
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &DashConfig,
    source: Arc<dyn LogSource>,
    mode: &SourceMode,
    runtime: tokio::runtime::Handle,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let dispatcher = FetchDispatcher::new(source, tx, runtime);
    let mut state = DashboardState::new(&config.polling, Instant::now());

    loop {
        // Fire whatever timers are due
        for request in state.tick(Instant::now()) {
            dispatcher.dispatch(request);
        }

        // Draw UI
        terminal.draw(|frame| draw_ui(frame, &state, mode))?;

        // Handle input
        let timeout = state
            .next_wakeup()
            .map(|at| at.saturating_duration_since(Instant::now()))
            .unwrap_or(FRAME)
            .min(FRAME);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(&mut state, key) {
                    state.shutdown();
                    return Ok(());
                }
            }
        }

        // Apply finished fetches
        while let Ok(outcome) = rx.try_recv() {
            state.apply(outcome);
        }
    }
}

/// Returns false when the user asked to quit.
fn handle_key(state: &mut DashboardState, key: KeyEvent) -> bool {
    let now = Instant::now();
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return false,
        KeyCode::Char('c') if ctrl => return false,
        KeyCode::Char('u') if ctrl => state.clear_search(now),
        KeyCode::Char(c) if !ctrl => state.push_char(c, now),
        KeyCode::Backspace => state.pop_char(now),
        KeyCode::Up => state.scroll_up(1),
        KeyCode::Down => state.scroll_down(1),
        KeyCode::PageUp => state.scroll_up(PAGE),
        KeyCode::PageDown => state.scroll_down(PAGE),
        KeyCode::Home => state.scroll_home(),
        _ => {}
    }
    true
}
