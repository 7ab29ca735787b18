//! Client configuration
//!
//! [`ClientConfig`] is loaded from YAML, overlaid with environment
//! variables and validated before any request goes out.
//!
//! ```yaml
//! base_url: https://api.twitter.com/2
//! bearer_token: AAAA...
//! timeout_secs: 30
//! cooldown_secs: 3.0
//! target_cooldown_secs: 3.1
//! ```

use crate::auth::BearerToken;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::pagination::PaginationConfig;
use crate::resource::ResourcePath;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the bearer token
pub const ENV_BEARER_TOKEN: &str = "SEARCH_CLIENT_BEARER_TOKEN";

/// Fallback token variable
pub const ENV_BEARER_TOKEN_FALLBACK: &str = "BEARER_TOKEN";

/// Environment variable overriding the API base
pub const ENV_BASE_URL: &str = "SEARCH_CLIENT_BASE_URL";

/// Default API base
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/2";

// ============================================================================
// Client Config
// ============================================================================

/// Everything needed to build a [`crate::client::SearchClient`]
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// App-only bearer token
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause between pages of a page-limited or counts run
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: f64,

    /// Pause between pages of an item-target run
    #[serde(default = "default_target_cooldown_secs")]
    pub target_cooldown_secs: f64,

    /// Smallest `max_results` the provider accepts
    #[serde(default = "default_min_page_size")]
    pub min_page_size: u32,

    /// Largest `max_results` the provider accepts
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("search-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_cooldown_secs() -> f64 {
    3.0
}

fn default_target_cooldown_secs() -> f64 {
    3.1
}

fn default_min_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bearer_token: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            cooldown_secs: default_cooldown_secs(),
            target_cooldown_secs: default_target_cooldown_secs(),
            min_page_size: default_min_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl ClientConfig {
    /// Defaults with the given token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Replace the API base
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set both cooldowns
    #[must_use]
    pub fn cooldowns(mut self, cooldown_secs: f64, target_cooldown_secs: f64) -> Self {
        self.cooldown_secs = cooldown_secs;
        self.target_cooldown_secs = target_cooldown_secs;
        self
    }

    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load from a YAML string; an empty document yields the defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overlay the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Overlay values from `lookup`, which maps a variable name to its value
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) =
            non_blank(ENV_BEARER_TOKEN).or_else(|| non_blank(ENV_BEARER_TOKEN_FALLBACK))
        {
            self.bearer_token = Some(token);
        }
        if let Some(base_url) = non_blank(ENV_BASE_URL) {
            self.base_url = base_url;
        }
    }

    /// Check every field before a client is built
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        self.token()?;

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }

        for (field, secs) in [
            ("cooldown_secs", self.cooldown_secs),
            ("target_cooldown_secs", self.target_cooldown_secs),
        ] {
            if let Err(e) = Duration::try_from_secs_f64(secs) {
                return Err(Error::invalid_value(
                    field,
                    format!("must be a non-negative number of seconds, got {secs} ({e})"),
                ));
            }
        }

        self.pagination(self.cooldown()).validate()
    }

    /// The bearer token, if present and non-blank
    pub fn token(&self) -> Result<BearerToken> {
        match self.bearer_token.as_deref() {
            Some(token) => BearerToken::new(token),
            None => Err(Error::missing_field("bearer_token")),
        }
    }

    /// The API base as a locator
    pub fn base_path(&self) -> ResourcePath {
        ResourcePath::new(self.base_url.trim_end_matches('/'))
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Cooldown for page-limited and counts runs
    pub fn cooldown(&self) -> Duration {
        Duration::try_from_secs_f64(self.cooldown_secs).unwrap_or_default()
    }

    /// Cooldown for item-target runs
    pub fn target_cooldown(&self) -> Duration {
        Duration::try_from_secs_f64(self.target_cooldown_secs).unwrap_or_default()
    }

    /// Page bounds with the given cooldown
    pub fn pagination(&self, cooldown: Duration) -> PaginationConfig {
        PaginationConfig::default()
            .with_cooldown(cooldown)
            .with_page_bounds(self.min_page_size, self.max_page_size)
    }

    /// Transport settings
    pub fn http(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .timeout(self.timeout())
            .user_agent(&self.user_agent)
            .build()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("cooldown_secs", &self.cooldown_secs)
            .field("target_cooldown_secs", &self.target_cooldown_secs)
            .field("min_page_size", &self.min_page_size)
            .field("max_page_size", &self.max_page_size)
            .finish()
    }
}
