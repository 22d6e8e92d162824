// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconcilers that react to watch events.

pub mod rollout;

pub use rollout::RolloutReconciler;
