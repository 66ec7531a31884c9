//! # Error Types
//!
//! Domain-specific error types for artbid-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  artbid-core errors (this file)                                        │
//! │  ├── CoreError        - Checkout / domain errors                       │
//! │  └── ValidationError  - Malformed input values                         │
//! │                                                                         │
//! │  artbid-client errors (separate crate)                                 │
//! │  └── ClientError      - HTTP and config failures                       │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError         - What the frontend / CLI sees (serialized)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError ← ClientError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that the checkout reducer itself never returns an error. Every
//! `CoreError` comes from a step *around* it: parsing, the optional
//! sequential policy, or building the order request.

use thiserror::Error;

use crate::validation::FieldErrors;

// =============================================================================
// Core Error
// =============================================================================

/// Checkout and domain errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The order cannot be built yet.
    ///
    /// ## When This Occurs
    /// - Submitting with an empty cart
    /// - Submitting before the shipping address is set
    /// - Submitting before the payment step produced an intent
    #[error("Checkout is incomplete: missing {}", .missing.join(", "))]
    CheckoutIncomplete { missing: Vec<String> },

    /// A transition was rejected by the sequential checkout policy.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart empty ──► SetAddress ──► OutOfOrder { action: "SET_ADDRESS", step: "empty" }
    /// ```
    #[error("{action} is not allowed at checkout step '{step}'")]
    OutOfOrder { action: String, step: String },

    /// One or more form fields failed validation.
    #[error("{} field(s) failed validation: {}", .0.len(), .0.summary())]
    InvalidForm(FieldErrors),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for single values.
///
/// Form-level validation (the per-field messages shown next to inputs) lives
/// in [`crate::validation`] and produces [`FieldErrors`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. an amount with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
