//! # ArtBid Storefront
//!
//! The storefront shell: state, commands and the `artbid` command line.
//!
//! ## Module Organization
//! ```text
//! artbid_storefront/
//! ├── lib.rs          ◄─── You are here (tracing setup & exports)
//! ├── cli.rs          ◄─── clap definitions and command dispatch
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── checkout.rs ◄─── CheckoutStore (the one owner of the order)
//! │   ├── session.rs  ◄─── Logged-in user
//! │   └── config.rs   ◄─── Currency and checkout policy
//! ├── commands/
//! │   ├── catalog.rs  ◄─── Products and artists
//! │   ├── bid.rs      ◄─── Bids (the only way into the cart)
//! │   ├── cart.rs     ◄─── Cart view and removal
//! │   ├── address.rs  ◄─── Shipping address
//! │   ├── payment.rs  ◄─── Mock payment intents
//! │   ├── order.rs    ◄─── Order submission
//! │   └── auth.rs     ◄─── Login, registration, logout
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Checkout Walkthrough
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Products ──► Bid ──► Cart ──► Address ──► Payment ──► Submit ──► Reset │
//! │               │        │         │            │           │             │
//! │            AddToCart  Remove   SetAddress  SetPayment   placeorder      │
//! │                                            Intent                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use error::{ApiError, ErrorCode};
pub use state::{CheckoutStore, ConfigState, DispatchOutcome, RequestTicket, SessionState};

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `ERROR`: Something went wrong that needs attention
/// - `WARN`: Rejected bids, refused orders, failed requests
/// - `INFO`: Bids accepted, orders placed, logins
/// - `DEBUG`: Every command and checkout transition
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
///
/// ## Environment Variable
/// Set `RUST_LOG` to control log level:
/// ```bash
/// RUST_LOG=debug artbid products
/// RUST_LOG=artbid_storefront::state=trace artbid checkout ...
/// ```
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,artbid=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
