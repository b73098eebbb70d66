// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod log_notifier;
mod routes;
mod slack;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use clap::Parser;
use rota_api::{Notifier, RotaCommands, RotaStore, SharedPersistence, ShiftScheduler};
use rota_domain::ShiftPolicy;
use rota_persistence::Persistence;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::log_notifier::LogNotifier;
use crate::routes::{AppState, build_router};
use crate::slack::SlackNotifier;

/// Rota Bot Server - on-call rotas for chat channels
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "ROTA_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, env = "ROTA_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, env = "ROTA_PORT", default_value_t = 3000)]
    port: u16,

    /// Seconds between expired-shift sweeps
    #[arg(long, default_value_t = 60)]
    sweep_interval_secs: u64,

    /// Upper bound on each storage call, in milliseconds
    #[arg(long, default_value_t = 5000)]
    storage_timeout_ms: u64,

    /// Slack bot token. Messages are only logged when absent.
    #[arg(long, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    slack_token: Option<String>,

    /// Base URL of the Slack Web API
    #[arg(long, default_value = "https://slack.com/api")]
    slack_api_url: String,

    /// Timeout for Slack API requests, in seconds
    #[arg(long, default_value_t = 10)]
    slack_timeout_secs: u64,

    /// Use a fixed shift length in minutes instead of the configured weeks.
    /// Meant for trying the bot out locally.
    #[arg(long)]
    fixed_shift_minutes: Option<u32>,
}

impl Args {
    fn shift_policy(&self) -> ShiftPolicy {
        self.fixed_shift_minutes
            .map_or(ShiftPolicy::Weekly, |minutes| {
                ShiftPolicy::Fixed(time::Duration::minutes(i64::from(minutes)))
            })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Rota Bot Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let store: Arc<dyn RotaStore> = Arc::new(SharedPersistence::with_timeout(
        persistence,
        Duration::from_millis(args.storage_timeout_ms),
    ));

    let notifier: Arc<dyn Notifier> = if let Some(token) = &args.slack_token {
        info!(api_url = %args.slack_api_url, "Posting to Slack");
        Arc::new(SlackNotifier::new(
            &args.slack_api_url,
            token,
            Duration::from_secs(args.slack_timeout_secs),
        )?)
    } else {
        warn!("No Slack token configured, messages will only be logged");
        Arc::new(LogNotifier)
    };

    let policy: ShiftPolicy = args.shift_policy();
    if let ShiftPolicy::Fixed(length) = policy {
        warn!(%length, "Using a fixed shift length");
    }

    let commands: RotaCommands =
        RotaCommands::new(Arc::clone(&store), Arc::clone(&notifier), policy);
    let scheduler: ShiftScheduler = ShiftScheduler::new(
        store,
        notifier,
        policy,
        Duration::from_secs(args.sweep_interval_secs),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_task = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    let app: Router = build_router(AppState {
        commands: Arc::new(commands),
    });

    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Stopping shift scheduler");
    if shutdown_tx.send(true).is_err() {
        warn!("Shift scheduler already stopped");
    }
    scheduler_task.await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
