// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreezerError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Watch stream error ({code} {reason}): {message}")]
    WatchError {
        code: u16,
        reason: String,
        message: String,
    },

    #[error("Watch stream closed by the API server")]
    StreamClosed,

    #[error("Reconcile loop cancelled")]
    Cancelled,

    #[error("Set repository freeze for {repository} failed: {source}")]
    SetFreezeFailed {
        repository: String,
        #[source]
        source: GatewayError,
    },
}

impl FreezerError {
    /// Whether the error is the result of a requested shutdown
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FreezerError::Cancelled)
    }
}

impl From<kube::core::ErrorResponse> for FreezerError {
    fn from(status: kube::core::ErrorResponse) -> Self {
        FreezerError::WatchError {
            code: status.code,
            reason: status.reason,
            message: status.message,
        }
    }
}

/// Failures of a single freeze call
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Transport failure; carries no URL, since the request URL holds the access token
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("Invalid freeze endpoint: {0}")]
    InvalidUrl(String),

    #[error("Invalid repository name: {0:?}")]
    InvalidRepository(String),

    #[error("bad status: {0}")]
    BadStatus(String),
}

pub type Result<T> = std::result::Result<T, FreezerError>;
