//! # artbid-client: Storefront Backend Access
//!
//! Everything that talks to the network lives here.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        artbid-client                                    │
//! │                                                                         │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────────────────┐ │
//! │  │    config     │──►│      api      │──►│  reqwest::Client          │ │
//! │  │  ClientConfig │   │ StorefrontApi │   │  (cookie store, timeout)  │ │
//! │  └───────────────┘   └───────┬───────┘   └───────────────────────────┘ │
//! │                              │                                          │
//! │                  ┌───────────┴───────────┐                             │
//! │                  ▼                       ▼                             │
//! │          ┌───────────────┐       ┌───────────────┐                     │
//! │          │     fetch     │       │    session    │                     │
//! │          │  Fetcher<T>   │       │  AuthSession  │                     │
//! │          └───────────────┘       └───────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Base URL, timeout, endpoint overrides
//! - [`api`] - Typed backend calls
//! - [`fetch`] - Request wrapper with loading/error/data state and manual retry
//! - [`session`] - Logged-in email holder
//! - [`error`] - Client error types

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod session;

pub use api::{BidOutcome, StorefrontApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use fetch::{FetchRequest, FetchState, Fetcher};
pub use session::AuthSession;
