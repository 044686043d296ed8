// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication handling.

use std::sync::{PoisonError, RwLock};

use reqwest::{Client, RequestBuilder, Response};

use crate::config::{AuthMethod, GraphQlConfig};
use crate::error::GraphQlError;

/// HTTP client for GraphQL operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: GraphQlConfig,
    /// Token installed at runtime, takes precedence over `config.auth`.
    token: RwLock<Option<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: GraphQlConfig) -> Result<Self, GraphQlError> {
        if config.endpoint.trim().is_empty() {
            return Err(GraphQlError::Config("endpoint must not be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            config,
            token: RwLock::new(None),
        })
    }

    /// Replaces the runtime bearer token; `None` falls back to the configured auth.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Builds a POST request to the endpoint with authentication headers.
    pub fn build_request(&self) -> RequestBuilder {
        let req = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json");

        let token = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match (token, &self.config.auth) {
            (Some(token), _) => req.bearer_auth(token),
            (None, AuthMethod::Bearer { token }) => req.bearer_auth(token),
            (None, AuthMethod::None) => req,
        }
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, GraphQlError> {
        let resp = req.send().await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        Err(GraphQlError::Http(format!("{status}: {text}")))
    }
}
