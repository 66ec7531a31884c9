//! # Fetch Wrapper
//!
//! A request plus the observable state of its last run.
//!
//! ## State Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fetcher Lifecycle                                │
//! │                                                                         │
//! │   initial ──send()──► loading ──2xx + JSON──► data = Some(T)           │
//! │      ▲                   │                                              │
//! │      │                   ├──non-2xx────────► error = message           │
//! │      │                   └──transport err──► error = message           │
//! │      │                                                                  │
//! │      └──────reset()──────────────────────────────────────────          │
//! │                                                                         │
//! │   retry() re-sends the last request with the same error message.       │
//! │   Nothing is ever retried automatically.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed send keeps whatever `data` the previous successful send left.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Request
// =============================================================================

/// A replayable request description.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        FetchRequest {
            method: Method::GET,
            url: url.into(),
            body: None,
        }
    }

    /// A POST with a JSON body.
    pub fn post<B: Serialize>(url: impl Into<String>, body: &B) -> ClientResult<Self> {
        Ok(FetchRequest {
            method: Method::POST,
            url: url.into(),
            body: Some(serde_json::to_value(body)?),
        })
    }
}

// =============================================================================
// State
// =============================================================================

/// Observable result of the last send.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub is_loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
    /// HTTP status of the last answer, `None` if nothing was received.
    pub status: Option<u16>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState {
            is_loading: false,
            error: None,
            data: None,
            status: None,
        }
    }
}

impl<T> FetchState<T> {
    pub fn is_ok(&self) -> bool {
        !self.is_loading && self.error.is_none() && self.data.is_some()
    }
}

// =============================================================================
// Fetcher
// =============================================================================

/// Sends requests and records their outcome in a [`FetchState`].
pub struct Fetcher<T> {
    http: reqwest::Client,
    state: FetchState<T>,
    last: Option<(FetchRequest, Option<String>)>,
}

impl<T: DeserializeOwned> Fetcher<T> {
    pub fn new(http: reqwest::Client) -> Self {
        Fetcher {
            http,
            state: FetchState::default(),
            last: None,
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Takes the fetched data out, leaving `None` behind.
    pub fn take_data(&mut self) -> Option<T> {
        self.state.data.take()
    }

    /// Performs `request` and records the outcome.
    ///
    /// On failure `error` is `error_message` if given, otherwise the status
    /// reason or the transport error text.
    pub async fn send(
        &mut self,
        request: FetchRequest,
        error_message: Option<&str>,
    ) -> &FetchState<T> {
        self.last = Some((request.clone(), error_message.map(str::to_string)));
        self.state.is_loading = true;
        self.state.error = None;
        self.state.status = None;

        debug!(method = %request.method, url = %request.url, "Fetching");
        let result = self.execute(&request).await;

        self.state.is_loading = false;
        match result {
            Ok(data) => {
                self.state.data = Some(data);
            }
            Err(err) => {
                warn!(url = %request.url, error = %err, "Fetch failed");
                self.state.error = Some(
                    error_message
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string()),
                );
            }
        }
        &self.state
    }

    /// Re-sends the last request. `None` if nothing was sent yet.
    pub async fn retry(&mut self) -> Option<&FetchState<T>> {
        let (request, error_message) = self.last.clone()?;
        Some(self.send(request, error_message.as_deref()).await)
    }

    /// Clears the result back to the initial value.
    pub fn reset(&mut self) {
        self.state = FetchState::default();
    }

    async fn execute(&mut self, request: &FetchRequest) -> ClientResult<T> {
        let mut builder = self.http.request(request.method.clone(), &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        self.state.status = Some(status.as_u16());

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl<T> std::fmt::Debug for Fetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("is_loading", &self.state.is_loading)
            .field("error", &self.state.error)
            .field("status", &self.state.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let fetcher: Fetcher<Vec<u32>> = Fetcher::new(reqwest::Client::new());
        let state = fetcher.state();
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert!(state.data.is_none());
        assert!(state.status.is_none());
        assert!(!state.is_ok());
    }

    #[test]
    fn test_post_request_carries_json() {
        let request =
            FetchRequest::post("http://x/api", &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, Some(serde_json::json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_retry_without_request_is_none() {
        let mut fetcher: Fetcher<u32> = Fetcher::new(reqwest::Client::new());
        assert!(fetcher.retry().await.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_sets_error() {
        // Port 9 on localhost is closed in any sane test environment.
        let mut fetcher: Fetcher<u32> = Fetcher::new(reqwest::Client::new());
        let state = fetcher
            .send(FetchRequest::get("http://127.0.0.1:9/none"), Some("Could not load"))
            .await;
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Could not load"));
        assert!(state.status.is_none());

        fetcher.reset();
        assert!(fetcher.state().error.is_none());
    }
}
