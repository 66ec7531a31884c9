//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in ArtBid                                 │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Form invalid? ──── CoreError::InvalidForm ──────┐               │  │
//! │  │         │                                        │               │  │
//! │  │         ▼                                        ▼               │  │
//! │  │  Backend failed? ── ClientError::Status ────► ApiError ─────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  --json output:                                                        │
//! │    {"code": "BID_REJECTED", "message": "Bid too low. Retry agaian."}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use artbid_client::ClientError;
use artbid_core::{CoreError, FieldErrors, ValidationError};

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "1 field(s) failed validation: city: This field is required",
///   "fields": { "city": "This field is required" },
///   "retryable": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field messages when a form failed validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,

    /// Whether offering "Retry" makes sense
    pub retryable: bool,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, artist or saved address does not exist (404)
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The backend turned the bid down
    BidRejected,

    /// Order submitted before cart, address and payment were all set
    CheckoutIncomplete,

    /// Transition rejected by the sequential checkout policy
    OutOfOrder,

    /// Backend unreachable or timed out
    Network,

    /// Not logged in, or wrong credentials (401/403)
    Unauthorized,

    /// Backend answered with an error
    Upstream,

    /// Result arrived after the user navigated away
    Stale,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
            retryable: false,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Validation error for a single form field.
    pub fn field(field: &str, message: &str) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field, message);
        ApiError::from(CoreError::InvalidForm(fields))
    }

    /// Creates a rejected-bid error.
    pub fn bid_rejected(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BidRejected, message)
    }

    /// A result that arrived for a request the user already left behind.
    pub fn stale(what: &str) -> Self {
        ApiError::new(
            ErrorCode::Stale,
            format!("{} finished after the checkout moved on; result ignored", what),
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Converts a client error, replacing transport text with `fallback`.
    ///
    /// `fallback` is what the page shows when the request itself failed
    /// ("Failed to submit bid"). Backend messages are kept as they are.
    pub fn from_client(err: ClientError, fallback: &str) -> Self {
        let mut api = ApiError::from(err);
        if api.code == ErrorCode::Network {
            api.message = fallback.to_string();
        }
        api
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::CheckoutIncomplete { .. } => {
                ApiError::new(ErrorCode::CheckoutIncomplete, message)
            }
            CoreError::OutOfOrder { .. } => ApiError::new(ErrorCode::OutOfOrder, message),
            CoreError::InvalidForm(fields) => ApiError {
                fields: Some(fields),
                ..ApiError::validation(message)
            },
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts client errors to API errors.
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        let retryable = err.is_retryable();
        let code = match &err {
            ClientError::ConnectionFailed(_) | ClientError::Timeout(_) => ErrorCode::Network,
            ClientError::Status { status: 401 | 403, .. } => ErrorCode::Unauthorized,
            ClientError::Status { status: 404, .. } => ErrorCode::NotFound,
            ClientError::Status { .. } | ClientError::Decode(_) => ErrorCode::Upstream,
            ClientError::InvalidConfig(_)
            | ClientError::InvalidUrl(_)
            | ClientError::ConfigLoadFailed(_)
            | ClientError::Encode(_) => {
                tracing::error!("Client error: {}", err);
                ErrorCode::Internal
            }
        };
        ApiError {
            retryable,
            ..ApiError::new(code, err.user_message())
        }
    }
}
