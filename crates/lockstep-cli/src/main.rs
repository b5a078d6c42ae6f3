#![doc = include_str!("../README.md")]

mod config;
mod consumer;

use clap::Parser;
use config::CliArgs;
use core::time::Duration;
use lockstep::produce;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    init_logging();

    let token = CancellationToken::new();
    tokio::spawn(shutdown_signal(token.clone()));

    tracing::info!(count = args.count, pace_ms = args.pace_ms, "Starting producer");

    let producer = produce(args.count, Duration::from_millis(args.pace_ms), token)?;

    let mut out = std::io::stdout();
    let consumed = consumer::run(producer, &mut out).await?;

    tracing::info!(consumed, "Sequence complete");
    Ok(())
}

/// Logs go to stderr so stdout stays a clean value stream.
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn shutdown_signal(token: CancellationToken) {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    token.cancel();
}
