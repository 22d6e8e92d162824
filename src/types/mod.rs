// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Argo Rollout resource and the watch events derived from it.

pub mod event;
pub mod rollout;

pub use event::{RolloutEvent, RolloutSnapshot};
pub use rollout::{Rollout, RolloutPhase};
