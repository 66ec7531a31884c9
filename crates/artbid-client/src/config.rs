//! # Client Configuration
//!
//! Where the storefront backend lives and how long to wait for it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ARTBID_API_URL=https://shop.example.com/api                        │
//! │     ARTBID_TIMEOUT_MS=5000                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/artbid/artbid.toml (Linux)                               │
//! │     ~/Library/Application Support/com.artbid.artbid/artbid.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080/api, 10 second timeout                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # artbid.toml
//! [api]
//! base_url = "http://localhost:8080/api"
//! timeout_ms = 10000
//! # Optional absolute overrides for the two checkout endpoints
//! bid_url = "http://localhost:8080/api/checkout/placebid"
//! order_url = "http://localhost:8080/api/checkout/placeorder"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Default backend location.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default request timeout (milliseconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// =============================================================================
// API Settings
// =============================================================================

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL every relative endpoint is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (milliseconds).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Absolute URL for bid placement, overriding `{base_url}/checkout/placebid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_url: Option<String>,

    /// Absolute URL for order placement, overriding `{base_url}/checkout/placeorder`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_url: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            bid_url: None,
            order_url: None,
        }
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config pointing at `base_url` with default everything else.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ClientConfig {
            api: ApiSettings {
                base_url: base_url.into(),
                ..ApiSettings::default()
            },
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (artbid.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        check_http_url(&self.api.base_url)?;
        for url in [&self.api.bid_url, &self.api.order_url].into_iter().flatten() {
            check_http_url(url)?;
        }

        if self.api.timeout_ms == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ARTBID_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("ARTBID_TIMEOUT_MS") {
            match timeout.parse::<u64>() {
                Ok(ms) => self.api.timeout_ms = ms,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric ARTBID_TIMEOUT_MS"),
            }
        }

        if let Some(url) = lookup("ARTBID_BID_URL") {
            self.api.bid_url = Some(url);
        }

        if let Some(url) = lookup("ARTBID_ORDER_URL") {
            self.api.order_url = Some(url);
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "artbid", "artbid")
            .map(|dirs| dirs.config_dir().join("artbid.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.api.timeout_ms)
    }

    /// `{base_url}/{path}` with exactly one slash between the two.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn bid_endpoint(&self) -> String {
        self.api
            .bid_url
            .clone()
            .unwrap_or_else(|| self.endpoint("checkout/placebid"))
    }

    pub fn order_endpoint(&self) -> String {
        self.api
            .order_url
            .clone()
            .unwrap_or_else(|| self.endpoint("checkout/placeorder"))
    }
}

/// Parses `raw` and requires an http or https scheme.
fn check_http_url(raw: &str) -> ClientResult<()> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ClientError::InvalidUrl(format!(
            "URL must use http or https, got {}: {}",
            other, raw
        ))),
    }
}
