// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! gotomate: the condition automation daemon.
//!
//! Loads a configuration document, serves the HTTP surface over the
//! condition registry and supervises the declared trigger watches until a
//! signal or a watch failure brings it down.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod server;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal::unix::{signal as unix_signal, SignalKind};
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, warn};

use gtm_conditional::signal;
use gtm_config::Registry;
use gtm_trigger::WatchError;

/// How long a graceful shutdown may take before the process gives up on
/// draining.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "gotomate", about = "Start an automation server.", version)]
struct Args {
    /// The endpoint to listen on
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    endpoint: String,

    /// The configuration file to use
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let args = Args::parse();

    let registry = match &args.config_file {
        Some(path) => {
            let document = tokio::fs::read_to_string(path).await?;
            Registry::load(&document).await?
        }
        None => Registry::new(),
    };
    let registry = Arc::new(registry);

    let listener = tokio::net::TcpListener::bind(&args.endpoint).await?;
    info!(endpoint = %args.endpoint, "started http server");

    let (http_stop, http_stopped) = oneshot::channel::<()>();
    let app = server::router(Arc::clone(&registry));
    let http = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = http_stopped.await;
            })
            .await
    });

    let (watch_stop, watch_cancel) = signal::pair();
    let mut watches = Some(tokio::spawn({
        let registry = Arc::clone(&registry);
        async move { registry.watch(watch_cancel).await }
    }));

    let mut sigint = unix_signal(SignalKind::interrupt())?;
    let mut sigterm = unix_signal(SignalKind::terminate())?;

    let outcome: Result<(), Box<dyn std::error::Error>> = loop {
        tokio::select! {
            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break Ok(());
            }

            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break Ok(());
            }

            result = join_watches(&mut watches) => {
                watches = None;

                match result {
                    // Nothing left to supervise; keep serving HTTP.
                    Ok(Ok(())) => {}
                    Ok(Err(watch_error)) => {
                        error!(%watch_error, "watch failed");
                        break Err(watch_error.into());
                    }
                    Err(join_error) => {
                        error!(%join_error, "watch supervisor aborted");
                        break Err(join_error.into());
                    }
                }
            }
        }
    };

    watch_stop.release();
    let _ = http_stop.send(());

    let drain = async {
        let _ = http.await;

        if let Some(watches) = watches {
            let _ = watches.await;
        }
    };

    if tokio::time::timeout(SHUTDOWN_GRACE, drain).await.is_err() {
        warn!("shutdown drain timed out");
    }

    registry.close();
    info!("stopped");

    outcome
}

async fn join_watches(
    watches: &mut Option<JoinHandle<Result<(), WatchError>>>,
) -> Result<Result<(), WatchError>, JoinError> {
    match watches {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}
