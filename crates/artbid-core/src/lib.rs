//! # artbid-core: Pure Checkout Logic for ArtBid
//!
//! This crate is the **heart** of ArtBid. It holds the checkout state, the
//! transitions that change it, and the form rules that guard them, all as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ArtBid Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront (apps/storefront)                    │   │
//! │  │    Products ──► Bid ──► Cart ──► Address ──► Payment ──► Submit │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CheckoutStore::dispatch                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ artbid-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  reduce   │  │  forms    │  │   │
//! │  │   │  Address  │  │  BidPrice │  │  policy   │  │  payment  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ wire DTOs                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 artbid-client (HTTP layer)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, Address, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`checkout`] - Checkout state, actions, reducer and step policy
//! - [`validation`] - Form field rules
//! - [`payment`] - Payment forms and mock payment intents
//! - [`dto`] - Backend request/response bodies
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use artbid_core::checkout::{reduce, CheckoutAction, CheckoutState};
//! use artbid_core::{BidPrice, Money, Product};
//!
//! let product = Product::new("1", "Harbour at Dusk", Money::from_cents(50000));
//! let state = reduce(
//!     CheckoutState::new(),
//!     CheckoutAction::add_to_cart(product, BidPrice::parse("600").unwrap()),
//! );
//!
//! assert_eq!(state.total().to_string(), "600.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod dto;
pub mod error;
pub mod money;
pub mod payment;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{reduce, CheckoutAction, CheckoutPolicy, CheckoutState, CheckoutStep};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payment::PaymentMethod;
pub use types::*;
pub use validation::FieldErrors;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shown when the backend rejects a bid without saying why.
pub const BID_REJECTED_MESSAGE: &str = "Your bid is too LOW! Retry again.";
