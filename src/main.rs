//! `leave-calendar-sync` binary.
//!
//! ## Usage
//!
//! ```sh
//! # Service mode: hourly passes plus the status API, until Ctrl-C
//! leave-calendar-sync --config config/sync.yaml serve
//!
//! # Console mode: one pass, report printed as JSON
//! leave-calendar-sync --config config/sync.yaml once
//! ```

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leave_calendar_sync::api::{AppState, create_router};
use leave_calendar_sync::calendar::GoogleCalendar;
use leave_calendar_sync::config::{ConfigLoader, SyncConfig};
use leave_calendar_sync::source::WorkdaySource;
use leave_calendar_sync::sync::{SyncService, SyncSettings, spawn_scheduler};

#[derive(Parser)]
#[command(
    name = "leave-calendar-sync",
    version,
    about = "Keeps an out-of-office calendar in sync with a time-off report"
)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config/sync.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run passes on a schedule and serve the status API until interrupted
    Serve,
    /// Run a single pass and print its report
    Once,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("leave_calendar_sync=info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?
        .into_config();
    let service = Arc::new(build_service(&config)?);

    match cli.command {
        Command::Serve => {
            serve(service, &config).await?;
            Ok(0)
        }
        Command::Once => {
            let report = service.run_pass().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if report.outcome.is_failed() { 1 } else { 0 })
        }
    }
}

fn build_service(config: &SyncConfig) -> Result<SyncService> {
    let source = WorkdaySource::new(config.leave_source.clone())
        .context("failed to create leave source")?;
    let calendar =
        GoogleCalendar::new(config.calendar.clone()).context("failed to create calendar client")?;

    Ok(SyncService::new(
        Arc::new(source),
        Arc::new(calendar),
        SyncSettings::from_config(&config.calendar),
    ))
}

async fn serve(service: Arc<SyncService>, config: &SyncConfig) -> Result<()> {
    let cancel = CancellationToken::new();
    let scheduler = spawn_scheduler(
        Arc::clone(&service),
        config.schedule.interval(),
        cancel.clone(),
    );

    let address = config.server.socket_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(address = %address, "Status API listening");

    let router = create_router(AppState::new(service));
    let shutdown = cancel.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown requested");
            shutdown.cancel();
        })
        .await
        .context("status API server failed")?;

    cancel.cancel();
    scheduler.await.context("scheduler task failed")?;
    info!("Stopped");
    Ok(())
}
