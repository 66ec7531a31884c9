//! # State Module
//!
//! Storefront state, split into separate types so each command takes
//! only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      main / cli::run                            │   │
//! │  │  let store   = CheckoutStore::new(config.checkout_policy);      │   │
//! │  │  let session = SessionState::new();                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │CheckoutStore │  │ SessionState │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  currency_code   │              │
//! │  │   Checkout   │  │  AuthSession │  │  checkout_policy │              │
//! │  │   State>>    │  │  >>          │  │                  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CheckoutStore: one transition at a time, stale results dropped      │
//! │  • SessionState: Arc<Mutex<T>>, independent of the checkout            │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod checkout;
mod config;
mod session;

pub use checkout::{CheckoutStore, DispatchOutcome, RequestTicket};
pub use config::ConfigState;
pub use session::SessionState;
