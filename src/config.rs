// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, merge_freeze};
use crate::error::{FreezerError, Result};
use crate::secret_string::SecretString;
use std::env;
use std::time::Duration;
use url::Url;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// MergeFreeze access token, required
    pub access_token: SecretString,
    /// Base URL of the MergeFreeze API
    pub api_url: Url,
    /// Upper bound for a single freeze call
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let access_token = lookup(vars::ACCESS_TOKEN)
            .filter(|v| !v.is_empty())
            .map(SecretString::new)
            .ok_or_else(|| {
                FreezerError::ConfigError(format!(
                    "undefined environment variable: {}",
                    vars::ACCESS_TOKEN
                ))
            })?;

        let api_url =
            lookup(vars::API_URL).unwrap_or_else(|| merge_freeze::DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url).map_err(|e| {
            FreezerError::ConfigError(format!("{} is not a valid URL: {}", vars::API_URL, e))
        })?;

        let request_timeout = match lookup(vars::TIMEOUT_SECS) {
            Some(v) => v.parse::<u64>().map_err(|e| {
                FreezerError::ConfigError(format!(
                    "{} must be a number of seconds: {}",
                    vars::TIMEOUT_SECS, e
                ))
            })?,
            None => merge_freeze::DEFAULT_TIMEOUT_SECS,
        };

        Ok(Config {
            access_token,
            api_url,
            request_timeout: Duration::from_secs(request_timeout),
        })
    }
}
