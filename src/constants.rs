// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes annotation keys read from Rollouts
pub mod annotations {
    /// Names the source repository (e.g. `org/app`) whose main branch follows the rollout health
    pub const REPOSITORY: &str = "repository";
}

/// MergeFreeze API details
pub mod merge_freeze {
    /// Default API base URL
    pub const DEFAULT_API_URL: &str = "https://www.mergefreeze.com";
    /// Branch that gets frozen and unfrozen
    pub const BRANCH: &str = "main";
    /// User name reported to MergeFreeze for every state change
    pub const USER_NAME: &str = "Argo Rollout Bot";
    /// Default timeout for a single freeze call in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
}

/// Environment variables read at startup
pub mod env {
    pub const ACCESS_TOKEN: &str = "MERGE_FREEZE_ACCESS_TOKEN";
    pub const API_URL: &str = "MERGE_FREEZE_API_URL";
    pub const TIMEOUT_SECS: &str = "MERGE_FREEZE_TIMEOUT_SECS";
}
