//! HTTP transport used by the traversal engine.
//!
//! The engine only needs one operation: execute a request, get a response.
//! [`Transport`] captures that; [`ReqwestTransport`] is the default
//! implementation.
//!
//! # Examples
//!
//! ## Custom transport
//!
//! ```
//! use async_trait::async_trait;
//! use traverson::client::Transport;
//! use traverson::{HttpRequest, HttpResponse, Result};
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl Transport for Canned {
//!     async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse> {
//!         Ok(HttpResponse::new(200, r#"{"_links":{}}"#)
//!             .with_header("content-type", "application/hal+json"))
//!     }
//! }
//! ```

use super::config::ClientConfig;
use super::utils::{exponential_backoff, is_retryable_status};
use crate::error::{Result, TraversonError};
use crate::types::{HttpRequest, HttpResponse};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Executes a single HTTP request.
///
/// Implementations return non-success statuses as ordinary responses and
/// reserve errors for failures where no response was received.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request and return the full response.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request).await
    }
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
///
/// Retries are off by default; see [`ClientConfig::max_retries`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport with custom configuration
    ///
    /// # Errors
    ///
    /// Returns [`TraversonError::Config`] for an invalid proxy URL or if the
    /// underlying client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .user_agent(config.user_agent.clone());

        if !config.proxy_url.is_empty() {
            let proxy = reqwest::Proxy::all(&config.proxy_url).map_err(|e| {
                TraversonError::Config(format!("Invalid proxy URL '{}': {}", config.proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| TraversonError::Config(format!("Cannot build HTTP client: {}", e)))?;

        Ok(ReqwestTransport {
            client,
            config: Arc::new(config),
        })
    }

    /// Wrap an existing client, keeping its own settings.
    pub fn from_client(client: reqwest::Client, config: ClientConfig) -> Self {
        ReqwestTransport {
            client,
            config: Arc::new(config),
        }
    }

    /// Get the transport configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Single request/response exchange, no retries
    async fn execute_once(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut req_builder = self
            .client
            .request(request.method.clone(), request.uri.as_str())
            .headers(request.headers.clone());

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let response = req_builder.send().await?;
        let status = response.status().as_u16();

        let mut headers = BTreeMap::new();
        for (k, v) in response.headers() {
            if let Ok(val) = v.to_str() {
                headers.insert(k.as_str().to_string(), val.to_string());
            }
        }

        let body = response.bytes().await?;

        if self.config.enable_logging {
            tracing::debug!(
                method = %request.method,
                uri = %request.uri,
                status,
                bytes = body.len(),
                "received response"
            );
        }

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut attempt = 0;

        loop {
            let outcome = self.execute_once(&request).await;
            let retry = attempt < self.config.max_retries
                && match &outcome {
                    Ok(response) => is_retryable_status(response.status),
                    Err(e) => e.is_retryable(),
                };

            if !retry {
                return outcome;
            }

            let delay = exponential_backoff(attempt, self.config.retry_delay_ms);
            match &outcome {
                Ok(response) => tracing::warn!(
                    "Request to {} answered {} (attempt {}), retrying after {:?}",
                    request.uri,
                    response.status,
                    attempt + 1,
                    delay
                ),
                Err(e) => tracing::warn!(
                    "Request to {} failed (attempt {}), retrying after {:?}: {}",
                    request.uri,
                    attempt + 1,
                    delay,
                    e
                ),
            }
            sleep(delay).await;
            attempt += 1;
        }
    }
}
