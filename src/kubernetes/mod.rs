// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and the Rollout watch.

pub mod client;
pub mod watch;

pub use client::create_client;
pub use watch::{EventSource, KubeEventSource, Subscription};
