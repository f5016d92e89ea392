//! Website Monitor
//!
//! Probes a fixed set of URLs every interval and sends a Telegram message
//! once an endpoint has failed enough consecutive checks.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────┐   tick    ┌──────────────┐  probe   ┌─────────────┐
//!   │  timer   │──────────▶│ MonitorLoop  │─────────▶│ HttpProber  │──▶ endpoints
//!   └──────────┘           │  + counter   │◀─────────│             │
//!                          └──────┬───────┘ outcome  └─────────────┘
//!                                 │ streak >= threshold
//!                                 ▼
//!                          ┌──────────────┐
//!                          │   Notifier   │──▶ Telegram Bot API
//!                          └──────────────┘
//! ```
//!
//! # Exit Status
//! - 0: shut down by signal, or `--once` completed
//! - 1: invalid configuration or failed notifier self-test

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use website_monitor::config::load_config;
use website_monitor::lifecycle::signals::wait_for_shutdown_signal;
use website_monitor::lifecycle::startup::{self, StartupError};
use website_monitor::monitor::MonitorLoop;
use website_monitor::observability::logging;
use website_monitor::Shutdown;

#[derive(Parser)]
#[command(name = "website-monitor")]
#[command(about = "Probe websites and alert on repeated failures", long_about = None)]
struct Cli {
    /// TOML configuration file. Environment variables override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log alerts instead of sending them; Telegram credentials are not required.
    #[arg(long)]
    dry_run: bool,

    /// Run a single check cycle, print the report as JSON, and exit.
    #[arg(long)]
    once: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A missing .env file is fine; values may come from the real environment.
    let _ = dotenvy::dotenv();

    let mut config = match load_config(cli.config.as_deref(), !cli.dry_run) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };
    config.observability.json |= cli.log_json;

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli, config: website_monitor::MonitorConfig) -> Result<(), StartupError> {
    tracing::info!(
        endpoints = config.endpoints.len(),
        interval_secs = config.schedule.interval_secs,
        connect_timeout_secs = config.probe.connect_timeout_secs,
        threshold = config.alert.threshold,
        "Configuration loaded"
    );

    let prober = startup::build_prober(&config)?;
    let notifier = startup::build_notifier(&config, cli.dry_run)?;
    startup::verify_notifier(notifier.as_ref()).await?;

    let monitor = MonitorLoop::from_config(&config, prober, notifier);

    if cli.once {
        let report = monitor.on_tick().await;
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "Failed to render report"),
        }
        return Ok(());
    }

    tracing::info!("Monitoring websites...");

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(monitor.run(shutdown.subscribe()));

    wait_for_shutdown_signal().await;
    shutdown.trigger();
    let _ = handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
