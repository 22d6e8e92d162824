// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Branch freeze control for repositories mapped to Rollouts.

pub mod gateway;
pub mod merge_freeze;

pub use gateway::{FreezeGateway, FreezeRequest};
pub use merge_freeze::MergeFreezeClient;
