//! # Commands Module
//!
//! Everything the storefront can do, one module per page.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Commands                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐         │
//! │  │    catalog      │  │      bid        │  │      cart       │         │
//! │  │                 │  │                 │  │                 │         │
//! │  │ • list_products │  │ • place_bid     │  │ • get_cart      │         │
//! │  │ • get_product   │  │                 │  │ • remove_from_  │         │
//! │  │ • list_artists  │  │                 │  │   cart          │         │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘         │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐         │
//! │  │    address      │  │    payment      │  │     order       │         │
//! │  │                 │  │                 │  │                 │         │
//! │  │ • save_address  │  │ • pay           │  │ • submit_order  │         │
//! │  │ • load_saved_   │  │                 │  │                 │         │
//! │  │   address       │  │                 │  │                 │         │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────┘         │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │      auth       │   Every command returns Result<T, ApiError>.      │
//! │  │ • login/logout  │   Checkout state only changes through             │
//! │  │ • register      │   CheckoutStore::dispatch*.                       │
//! │  │ • check_session │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod address;
pub mod auth;
pub mod bid;
pub mod cart;
pub mod catalog;
pub mod order;
pub mod payment;
