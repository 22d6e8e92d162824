// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subset of the Argo Rollout spec. Only the status phase and metadata are consumed,
/// everything else in the resource is ignored on deserialization.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "argoproj.io", version = "v1alpha1", kind = "Rollout")]
#[kube(namespaced)]
#[kube(status = "RolloutStatus")]
#[serde(rename_all = "camelCase")]
pub struct RolloutSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolloutStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<RolloutPhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Health phase reported by the Argo Rollouts controller
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, schemars::JsonSchema)]
pub enum RolloutPhase {
    Healthy,
    Progressing,
    Paused,
    Degraded,
    Error,
    /// Missing or unrecognised phase
    #[default]
    #[serde(other)]
    Unknown,
}

impl RolloutPhase {
    pub fn is_healthy(self) -> bool {
        self == RolloutPhase::Healthy
    }
}

impl fmt::Display for RolloutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RolloutPhase::Healthy => "Healthy",
            RolloutPhase::Progressing => "Progressing",
            RolloutPhase::Paused => "Paused",
            RolloutPhase::Degraded => "Degraded",
            RolloutPhase::Error => "Error",
            RolloutPhase::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

impl Rollout {
    /// Current phase, `Unknown` until the controller reports one
    pub fn phase(&self) -> RolloutPhase {
        self.status
            .as_ref()
            .and_then(|s| s.phase)
            .unwrap_or_default()
    }
}
