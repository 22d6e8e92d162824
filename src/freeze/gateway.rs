// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::GatewayError;
use crate::types::RolloutSnapshot;
use std::future::Future;

/// Desired freeze state for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreezeRequest {
    pub repository: String,
    pub frozen: bool,
    pub note: String,
}

impl FreezeRequest {
    /// Map a rollout to the freeze state of its repository.
    /// Returns `None` for rollouts without a `repository` annotation.
    pub fn for_rollout(rollout: &RolloutSnapshot) -> Option<Self> {
        let repository = rollout.repository()?;
        Some(FreezeRequest {
            repository: repository.to_string(),
            frozen: !rollout.phase.is_healthy(),
            note: format!("Rollout phase is {}", rollout.phase),
        })
    }
}

/// Sets the freeze state of a repository branch. Calls must be idempotent.
pub trait FreezeGateway {
    fn set_freeze(
        &self,
        request: &FreezeRequest,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}
