// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! MergeFreeze HTTP client

use crate::config::Config;
use crate::constants::merge_freeze::{BRANCH, USER_NAME};
use crate::error::{FreezerError, GatewayError, Result};
use crate::freeze::gateway::{FreezeGateway, FreezeRequest};
use crate::secret_string::SecretString;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument};
use url::Url;

pub struct MergeFreezeClient {
    http: Client,
    api_url: Url,
    access_token: SecretString,
}

impl MergeFreezeClient {
    pub fn new(config: &Config) -> Result<Self> {
        info!("Initializing MergeFreeze HTTP client for {}", config.api_url);
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                FreezerError::ConfigError(format!("Failed to build HTTP client: {}", e))
            })?;

        if config.api_url.cannot_be_a_base() {
            return Err(FreezerError::ConfigError(format!(
                "MergeFreeze API URL {} cannot carry a path",
                config.api_url
            )));
        }

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            access_token: config.access_token.clone(),
        })
    }

    /// `<api_url>/api/branches/<owner>/<name>/main/`, each repository segment percent-encoded
    fn branch_url(&self, repository: &str) -> std::result::Result<Url, GatewayError> {
        let segments: Vec<&str> = repository.split('/').collect();
        if segments
            .iter()
            .any(|segment| segment.is_empty() || *segment == "." || *segment == "..")
        {
            return Err(GatewayError::InvalidRepository(repository.to_string()));
        }

        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "branches"])
            .extend(segments)
            .extend([BRANCH, ""]);
        Ok(url)
    }
}

impl FreezeGateway for MergeFreezeClient {
    #[instrument(skip(self, request), fields(repository = %request.repository, frozen = request.frozen))]
    async fn set_freeze(&self, request: &FreezeRequest) -> std::result::Result<(), GatewayError> {
        let url = self.branch_url(&request.repository)?;
        let frozen = request.frozen.to_string();

        debug!("Posting freeze state to {}", url);
        let response = self
            .http
            .post(url)
            .query(&[("access_token", self.access_token.expose_secret())])
            .form(&[
                ("frozen", frozen.as_str()),
                ("user_name", USER_NAME),
                ("note", request.note.as_str()),
            ])
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.without_url()))?;

        if response.status() != StatusCode::OK {
            return Err(GatewayError::BadStatus(response.status().to_string()));
        }

        debug!("Freeze state accepted");
        Ok(())
    }
}
