// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation from a kubeconfig file or in-cluster credentials

use crate::error::{FreezerError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Create a Kubernetes client.
///
/// An explicit kubeconfig path wins. Without one, `~/.kube/config` is used when it exists,
/// otherwise the in-cluster service account credentials.
#[instrument]
pub async fn create_client(kubeconfig: Option<&Path>) -> Result<Client> {
    let config = match resolve_kubeconfig_path(kubeconfig, home_dir()) {
        Some(path) => load_kubeconfig(&path).await?,
        None => {
            info!("No kubeconfig found, using in-cluster configuration");
            KConfig::incluster().map_err(|e| {
                FreezerError::KubeconfigError(format!("Failed to load in-cluster config: {}", e))
            })?
        }
    };

    info!("Connecting to Kubernetes API server at {}", config.cluster_url);
    Client::try_from(config)
        .map_err(|e| FreezerError::KubeconfigError(format!("Failed to create client: {}", e)))
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

fn resolve_kubeconfig_path(explicit: Option<&Path>, home: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let default_path = home?.join(".kube").join("config");
    if default_path.exists() {
        Some(default_path)
    } else {
        debug!("{} does not exist", default_path.display());
        None
    }
}

/// Build a client config from a kubeconfig file
async fn load_kubeconfig(path: &Path) -> Result<KConfig> {
    info!("Loading kubeconfig from {}", path.display());

    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        FreezerError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let kubeconfig: Kubeconfig = serde_yaml::from_str(&contents)
        .map_err(|e| FreezerError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| FreezerError::KubeconfigError(format!("Failed to create config: {}", e)))
}
