//! # Configuration State
//!
//! Display and checkout settings read at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`ARTBID_CURRENCY`, `ARTBID_CHECKOUT_POLICY`)
//! 2. Command-line flags (`--sequential`)
//! 3. Defaults (this file)
//!
//! Backend location and timeouts live in `artbid_client::ClientConfig`.
//!
//! ## Thread Safety
//! Read-only after initialization, so no mutex.

use serde::{Deserialize, Serialize};
use tracing::warn;

use artbid_core::{CheckoutPolicy, Money};

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Currency shown when a cart line carries none (ISO 4217)
    pub currency_code: String,

    /// Whether checkout steps must happen in order
    pub checkout_policy: CheckoutPolicy,
}

impl Default for ConfigState {
    /// Danish kroner, permissive checkout.
    fn default() -> Self {
        ConfigState {
            currency_code: "DKK".to_string(),
            checkout_policy: CheckoutPolicy::Permissive,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(code) = lookup("ARTBID_CURRENCY") {
            let code = code.trim().to_uppercase();
            if !code.is_empty() {
                config.currency_code = code;
            }
        }

        if let Some(policy) = lookup("ARTBID_CHECKOUT_POLICY") {
            match policy.parse() {
                Ok(policy) => config.checkout_policy = policy,
                Err(e) => warn!("Ignoring ARTBID_CHECKOUT_POLICY: {}", e),
            }
        }

        config
    }

    /// Formats an amount in `currency`, or the configured one if blank.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_price(Money::from_cents(60000), None), "600.00 DKK");
    /// ```
    pub fn format_price(&self, amount: Money, currency: Option<&str>) -> String {
        let currency = currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(&self.currency_code);
        amount.format_with(currency)
    }
}
