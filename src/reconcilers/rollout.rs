// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Rollout reconciler - mirrors Rollout health into the freeze state of the mapped repository.

use crate::error::{FreezerError, Result};
use crate::freeze::{FreezeGateway, FreezeRequest};
use crate::kubernetes::{EventSource, Subscription};
use crate::types::{RolloutEvent, RolloutSnapshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

pub struct RolloutReconciler<S, G> {
    source: S,
    gateway: G,
}

impl<S, G> RolloutReconciler<S, G>
where
    S: EventSource,
    G: FreezeGateway,
{
    pub fn new(source: S, gateway: G) -> Self {
        Self { source, gateway }
    }

    /// Watch Rollouts and apply every change to the freeze gateway, one event at a time.
    ///
    /// Never returns `Ok`: the loop ends with `Cancelled` once the token fires, or with the
    /// error that stopped it (watch error event, stream closed, failed freeze call).
    /// The subscription is stopped on every exit path.
    pub async fn run(&self, token: CancellationToken) -> Result<()> {
        let mut subscription = self.source.watch().await?;
        let result = self.process_events(&mut subscription, &token).await;
        subscription.stop();
        result
    }

    async fn process_events(
        &self,
        subscription: &mut Subscription,
        token: &CancellationToken,
    ) -> Result<()> {
        loop {
            let event = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(FreezerError::Cancelled),
                event = subscription.next() => event,
            };

            match event {
                Some(Ok(event)) => self.handle_event(event).await?,
                Some(Err(e)) => return Err(e),
                None => return Err(FreezerError::StreamClosed),
            }
        }
    }

    async fn handle_event(&self, event: RolloutEvent) -> Result<()> {
        let kind = event.kind();
        match event {
            RolloutEvent::Error(status) => Err(status.into()),
            RolloutEvent::Added(rollout) | RolloutEvent::Modified(rollout) => {
                self.apply(kind, &rollout).await
            }
            RolloutEvent::Deleted(rollout) => {
                debug!("{}: {}, nothing to do", kind, rollout.qualified_name());
                Ok(())
            }
            RolloutEvent::Bookmark => Ok(()),
        }
    }

    #[instrument(skip(self, rollout), fields(rollout = %rollout.qualified_name()))]
    async fn apply(&self, kind: &str, rollout: &RolloutSnapshot) -> Result<()> {
        let Some(request) = FreezeRequest::for_rollout(rollout) else {
            debug!("Rollout has no repository annotation, skipping");
            return Ok(());
        };

        info!("{}: {} {}", kind, rollout.name, rollout.phase);

        self.gateway
            .set_freeze(&request)
            .await
            .map_err(|source| FreezerError::SetFreezeFailed {
                repository: request.repository.clone(),
                source,
            })?;

        info!(
            "Repository {} {}",
            request.repository,
            if request.frozen { "frozen" } else { "unfrozen" }
        );
        Ok(())
    }
}
