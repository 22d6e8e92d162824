// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rollout_freezer::config::Config;
use rollout_freezer::freeze::MergeFreezeClient;
use rollout_freezer::kubernetes::{create_client, KubeEventSource};
use rollout_freezer::reconcilers::RolloutReconciler;

#[derive(Parser)]
#[command(name = "rollout-freezer")]
#[command(about = "Freezes the main branch of repositories whose Argo Rollout is not healthy")]
#[command(version)]
struct Cli {
    /// Path to Kubernetes config file
    #[arg(long)]
    kubeconfig: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, info by default so every processed rollout event is logged
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Starting rollout-freezer {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: api_url={}, request_timeout={:?}",
        config.api_url, config.request_timeout
    );

    let client = create_client(cli.kubeconfig.as_deref())
        .await
        .context("could not build Kubernetes configuration")?;
    let gateway = MergeFreezeClient::new(&config)?;

    let token = CancellationToken::new();
    tokio::spawn(cancel_on_shutdown_signal(token.clone()));

    let reconciler = RolloutReconciler::new(KubeEventSource::new(client), gateway);
    match reconciler.run(token).await {
        Err(e) if e.is_cancelled() => {
            info!("Shutdown requested, stopped watching rollouts");
            Ok(())
        }
        Err(e) => {
            error!("[FAIL] {}", e);
            Err(e.into())
        }
        Ok(()) => {
            warn!("Rollout watch stopped unexpectedly");
            Ok(())
        }
    }
}

/// Cancel the token on SIGINT or SIGTERM
async fn cancel_on_shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
    token.cancel();
}
