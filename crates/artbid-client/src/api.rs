//! # Storefront API
//!
//! Typed calls to the storefront backend.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Backend                                │
//! │                                                                         │
//! │  Catalog                          Checkout                              │
//! │  ───────                          ────────                              │
//! │  GET  /products                   POST /checkout/placebid               │
//! │  GET  /products/available         POST /checkout/placeorder             │
//! │  GET  /products/{id}                                                    │
//! │  GET  /artists                    Auth                                  │
//! │                                   ────                                  │
//! │                                   POST /auth/login                      │
//! │                                   POST /auth/register                   │
//! │                                   POST /auth/logout                     │
//! │                                   GET  /auth/check                      │
//! │                                   GET  /auth/address                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend keeps the login session in an HttpOnly cookie, so the inner
//! `reqwest::Client` has a cookie store and every clone of [`StorefrontApi`]
//! shares it.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use artbid_core::dto::{
    AuthCheck, AuthResponse, BidRequest, BidResponse, Credentials, OrderRequest, OrderResponse,
    ProductEnvelope, Registration, SavedAddress,
};
use artbid_core::{Address, Artist, Product, ProductId, BID_REJECTED_MESSAGE};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::fetch::{FetchRequest, Fetcher};

// =============================================================================
// Bid Outcome
// =============================================================================

/// What the backend decided about a bid.
///
/// A rejected bid is an answer, not a failure: the request went through
/// and the backend said no.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidOutcome {
    Accepted { message: Option<String> },
    Rejected { message: String },
}

impl BidOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, BidOutcome::Accepted { .. })
    }
}

// =============================================================================
// Client
// =============================================================================

/// Typed storefront backend client.
#[derive(Clone)]
pub struct StorefrontApi {
    inner: Arc<StorefrontApiInner>,
}

struct StorefrontApiInner {
    http: reqwest::Client,
    config: ClientConfig,
}

impl StorefrontApi {
    /// Builds a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the config is invalid or the HTTP client fails to build.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .build()?;

        info!(base_url = %config.base_url(), "Storefront API client ready");
        Ok(Self {
            inner: Arc::new(StorefrontApiInner { http, config }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// A [`Fetcher`] sharing this client's cookies and timeout.
    pub fn fetcher<T: DeserializeOwned>(&self) -> Fetcher<T> {
        Fetcher::new(self.inner.http.clone())
    }

    /// GET request for a path under the base URL.
    pub fn get_request(&self, path: &str) -> FetchRequest {
        FetchRequest::get(self.inner.config.endpoint(path))
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.get("products").await
    }

    /// Products that are not sold yet.
    pub async fn list_available_products(&self) -> ClientResult<Vec<Product>> {
        self.get("products/available").await
    }

    pub async fn get_product(&self, id: &ProductId) -> ClientResult<Product> {
        let envelope: ProductEnvelope = self.get(&format!("products/{}", id)).await?;
        Ok(envelope.product)
    }

    pub async fn list_artists(&self) -> ClientResult<Vec<Artist>> {
        self.get("artists").await
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Places a bid.
    ///
    /// ## Outcome
    /// - 2xx without `accepted: false` → accepted
    /// - 2xx with `accepted: false`, or a 400 carrying a body → rejected
    /// - anything else → error
    pub async fn place_bid(&self, request: &BidRequest) -> ClientResult<BidOutcome> {
        let url = self.inner.config.bid_endpoint();
        debug!(url = %url, product_id = %request.product_id, amount = %request.amount, "Placing bid");

        let response = self.inner.http.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<BidResponse> = serde_json::from_str(&body).ok();

        if status.is_success() {
            let parsed = parsed.unwrap_or_default();
            if parsed.accepted == Some(false) {
                return Ok(BidOutcome::Rejected {
                    message: rejection_text(&parsed),
                });
            }
            return Ok(BidOutcome::Accepted {
                message: parsed.text().map(str::to_string),
            });
        }

        match (status, parsed) {
            (status, Some(parsed)) if status == StatusCode::BAD_REQUEST => Ok(BidOutcome::Rejected {
                message: rejection_text(&parsed),
            }),
            (status, parsed) => Err(status_error(
                status,
                parsed.as_ref().and_then(BidResponse::text),
                &body,
            )),
        }
    }

    /// Places the order.
    ///
    /// A 2xx body with `success: false` is returned as is; the caller decides.
    pub async fn place_order(&self, request: &OrderRequest) -> ClientResult<OrderResponse> {
        let url = self.inner.config.order_endpoint();
        info!(lines = request.cart.len(), "Placing order");
        self.post_url(&url, request).await
    }

    // =========================================================================
    // Auth
    // =========================================================================

    pub async fn login(&self, credentials: &Credentials) -> ClientResult<AuthResponse> {
        self.post("auth/login", credentials).await
    }

    pub async fn register(&self, registration: &Registration) -> ClientResult<AuthResponse> {
        self.post("auth/register", registration).await
    }

    /// Ends the session; the backend clears the cookie.
    pub async fn logout(&self) -> ClientResult<()> {
        let url = self.inner.config.endpoint("auth/logout");
        let response = self.inner.http.post(&url).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(parse_error(response).await)
    }

    pub async fn check_session(&self) -> ClientResult<AuthCheck> {
        self.get("auth/check").await
    }

    /// Address saved with the logged-in account.
    pub async fn saved_address(&self) -> ClientResult<Address> {
        let saved: SavedAddress = self.get("auth/address").await?;
        Ok(saved.address)
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.inner.config.endpoint(path);
        debug!(url = %url, "GET");
        let response = self.inner.http.get(&url).send().await?;
        handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.inner.config.endpoint(path);
        self.post_url(&url, body).await
    }

    async fn post_url<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(url = %url, "POST");
        let response = self.inner.http.post(url).json(body).send().await?;
        handle_response(response).await
    }
}

impl std::fmt::Debug for StorefrontApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontApi")
            .field("base_url", &self.inner.config.base_url())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Response Handling
// =============================================================================

/// Decodes a 2xx body or turns the answer into [`ClientError::Status`].
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    if response.status().is_success() {
        return response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("Failed to parse response: {e}")));
    }
    Err(parse_error(response).await)
}

async fn parse_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = body_message(&body);
    warn!(status = status.as_u16(), message = ?message, "Backend returned an error");
    status_error(status, message.as_deref(), &body)
}

/// `message` or `error` from a JSON body.
fn body_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

fn status_error(status: StatusCode, message: Option<&str>, body: &str) -> ClientError {
    let message = match message {
        Some(m) => m.to_string(),
        // Plain-text error bodies ("No address found") are used as is.
        None if !body.trim().is_empty() && !body.trim_start().starts_with('{') => {
            body.trim().to_string()
        }
        None => status.canonical_reason().unwrap_or("Request failed").to_string(),
    };
    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

fn rejection_text(response: &BidResponse) -> String {
    response
        .text()
        .map(str::to_string)
        .unwrap_or_else(|| BID_REJECTED_MESSAGE.to_string())
}
