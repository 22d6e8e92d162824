// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Rollout watch subscriptions

use crate::error::{FreezerError, Result};
use crate::types::{Rollout, RolloutEvent};
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use kube::api::WatchParams;
use kube::{Api, Client};
use std::future::Future;
use tracing::{debug, info, instrument};

/// An empty resource version starts from the most recent state, served as ADDED events
/// from a quorum read rather than a possibly stale watch cache
const INITIAL_RESOURCE_VERSION: &str = "";

/// Opens subscriptions to Rollout lifecycle events
pub trait EventSource {
    fn watch(&self) -> impl Future<Output = Result<Subscription>> + Send;
}

/// An open stream of Rollout events.
///
/// `stop` releases the underlying stream and runs the stop hook. It is idempotent and
/// also runs when the subscription is dropped, so the hook fires exactly once.
pub struct Subscription {
    events: BoxStream<'static, Result<RolloutEvent>>,
    on_stop: Option<Box<dyn FnOnce() + Send>>,
    stopped: bool,
}

impl Subscription {
    pub fn new(events: impl Stream<Item = Result<RolloutEvent>> + Send + 'static) -> Self {
        Self {
            events: events.boxed(),
            on_stop: None,
            stopped: false,
        }
    }

    /// Register a hook that runs when the subscription is stopped
    pub fn on_stop(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_stop = Some(Box::new(hook));
        self
    }

    /// Next event, `None` once the stream has ended or the subscription was stopped
    pub async fn next(&mut self) -> Option<Result<RolloutEvent>> {
        if self.stopped {
            return None;
        }
        self.events.next().await
    }

    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.events = stream::empty().boxed();
        if let Some(hook) = self.on_stop.take() {
            hook();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Watches Argo Rollouts in all namespaces through the Kubernetes API
pub struct KubeEventSource {
    rollouts: Api<Rollout>,
}

impl KubeEventSource {
    pub fn new(client: Client) -> Self {
        Self {
            rollouts: Api::all(client),
        }
    }
}

impl EventSource for KubeEventSource {
    #[instrument(skip(self))]
    async fn watch(&self) -> Result<Subscription> {
        let events = self
            .rollouts
            .watch(&WatchParams::default(), INITIAL_RESOURCE_VERSION)
            .await?;
        info!("Watching rollouts in all namespaces");

        let events = events.map(|event| event.map(RolloutEvent::from).map_err(FreezerError::from));
        Ok(Subscription::new(events).on_stop(|| debug!("Rollout watch stopped")))
    }
}
