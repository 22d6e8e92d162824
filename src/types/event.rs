// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watch events for Rollouts, resolved once at the stream boundary.

use crate::constants::annotations;
use crate::types::rollout::{Rollout, RolloutPhase};
use kube::api::WatchEvent;
use kube::core::ErrorResponse;
use kube::ResourceExt;
use std::collections::BTreeMap;

/// The parts of a Rollout the reconcile loop looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloutSnapshot {
    pub name: String,
    pub namespace: Option<String>,
    pub annotations: BTreeMap<String, String>,
    pub phase: RolloutPhase,
}

impl RolloutSnapshot {
    /// Repository mapped to this rollout, `None` when the annotation is absent or empty
    pub fn repository(&self) -> Option<&str> {
        self.annotations
            .get(annotations::REPOSITORY)
            .map(String::as_str)
            .filter(|r| !r.is_empty())
    }

    /// `namespace/name`, or just the name when no namespace is set
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}/{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

impl From<Rollout> for RolloutSnapshot {
    fn from(rollout: Rollout) -> Self {
        let phase = rollout.phase();
        RolloutSnapshot {
            name: rollout.name_any(),
            namespace: rollout.namespace(),
            annotations: rollout.metadata.annotations.unwrap_or_default(),
            phase,
        }
    }
}

/// A change notification for a Rollout
#[derive(Debug, Clone, PartialEq)]
pub enum RolloutEvent {
    Added(RolloutSnapshot),
    Modified(RolloutSnapshot),
    Deleted(RolloutSnapshot),
    /// Resumption checkpoint, carries no resource change
    Bookmark,
    /// The subscription failed, the status describes why
    Error(ErrorResponse),
}

impl RolloutEvent {
    /// Short label used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            RolloutEvent::Added(_) => "ADDED",
            RolloutEvent::Modified(_) => "MODIFIED",
            RolloutEvent::Deleted(_) => "DELETED",
            RolloutEvent::Bookmark => "BOOKMARK",
            RolloutEvent::Error(_) => "ERROR",
        }
    }
}

impl From<WatchEvent<Rollout>> for RolloutEvent {
    fn from(event: WatchEvent<Rollout>) -> Self {
        match event {
            WatchEvent::Added(rollout) => RolloutEvent::Added(rollout.into()),
            WatchEvent::Modified(rollout) => RolloutEvent::Modified(rollout.into()),
            WatchEvent::Deleted(rollout) => RolloutEvent::Deleted(rollout.into()),
            WatchEvent::Bookmark(_) => RolloutEvent::Bookmark,
            WatchEvent::Error(status) => RolloutEvent::Error(status),
        }
    }
}
