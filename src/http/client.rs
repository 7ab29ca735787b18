//! HTTP client for the search provider
//!
//! A thin wrapper over reqwest that handles:
//! - Bearer token authentication
//! - Error classification (timeouts, non-2xx statuses)
//! - JSON body decoding

use crate::auth::BearerToken;
use crate::error::{Error, Result};
use crate::types::StringMap;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("search-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Query parameters for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub query: StringMap,
}

impl RequestConfig {
    /// Create a request config carrying a whole parameter bag
    pub fn with_params(params: &StringMap) -> Self {
        Self {
            query: params.clone(),
        }
    }
}

/// Authenticated HTTP client
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    token: BearerToken,
}

impl HttpClient {
    /// Create a client that authenticates every request with a bearer token
    pub fn with_token(config: HttpClientConfig, token: BearerToken) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            config,
            token,
        })
    }

    /// Make one GET request
    ///
    /// Non-2xx statuses are returned as [`Error::HttpStatus`] with the body
    /// text; nothing is retried.
    pub async fn get(&self, url: &str, config: RequestConfig) -> Result<Response> {
        let mut req = self.client.get(url);
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        req = self.token.apply(req);

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("GET {} -> {}", url, status.as_u16());
        Ok(response)
    }

    /// Make a GET request and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, config: RequestConfig) -> Result<T> {
        let response = self.get(url, config).await?;
        let body = response.text().await.map_err(Error::Http)?;
        let json: T = serde_json::from_str(&body)?;
        Ok(json)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}
