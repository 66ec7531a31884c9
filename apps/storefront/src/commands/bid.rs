//! # Bid Command
//!
//! Sends a bid to the backend and, if it is accepted, puts the artwork in
//! the cart at the bid price.
//!
//! ## Bid Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bid Flow                                         │
//! │                                                                         │
//! │  amount_text ──validate_field("bidAmount")──► "Bid must be greater..."  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BidPrice::parse ──► begin_request() ──► POST /checkout/placebid       │
//! │                                               │                         │
//! │                     ┌─────────────────────────┼──────────────┐          │
//! │                     ▼                         ▼              ▼          │
//! │                 Accepted                  Rejected      transport err   │
//! │                     │                         │              │          │
//! │      dispatch_if_current(AddToCart)     BID_REJECTED     NETWORK        │
//! │          │                 │                                            │
//! │       Applied            Stale ──► STALE (cart untouched)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use artbid_client::{BidOutcome, StorefrontApi};
use artbid_core::dto::BidRequest;
use artbid_core::validation::validate_field;
use artbid_core::{BidPrice, CheckoutAction, Product};

use crate::commands::cart::CartResponse;
use crate::error::ApiError;
use crate::state::{CheckoutStore, ConfigState, DispatchOutcome};

/// Message shown when the bid request itself fails.
const BID_FAILED_MESSAGE: &str = "Failed to submit bid";

/// An accepted bid and the cart it produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidReceipt {
    /// Backend confirmation, e.g. "Bid for product Id: 1 is accepted."
    pub message: Option<String>,
    pub bid_price: BidPrice,
    pub cart: CartResponse,
}

/// Places a bid on `product`.
///
/// ## Arguments
/// * `amount_text` - The amount as typed, e.g. "600" or "600.50"
///
/// ## Errors
/// - `VALIDATION_ERROR` for a blank, non-numeric or non-positive amount
/// - `BID_REJECTED` with the backend's reason, or
///   [`artbid_core::BID_REJECTED_MESSAGE`] when it gave none
/// - `STALE` when the checkout was invalidated while the bid was in flight
pub async fn place_bid(
    api: &StorefrontApi,
    store: &CheckoutStore,
    config: &ConfigState,
    product: &Product,
    amount_text: &str,
) -> Result<BidReceipt, ApiError> {
    debug!(product_id = %product.id, amount = %amount_text, "place_bid command");

    if let Some(message) = validate_field("bidAmount", amount_text, None) {
        return Err(ApiError::field("bidAmount", message));
    }
    let bid_price = BidPrice::parse(amount_text)?;

    if product.sold {
        return Err(ApiError::bid_rejected("Product already sold."));
    }

    let ticket = store.begin_request();
    let request = BidRequest {
        product_id: product.id.clone(),
        amount: bid_price.amount(),
    };

    let outcome = api
        .place_bid(&request)
        .await
        .map_err(|e| ApiError::from_client(e, BID_FAILED_MESSAGE))?;

    match outcome {
        BidOutcome::Accepted { message } => {
            let action = CheckoutAction::add_to_cart(product.clone(), bid_price);
            match store.dispatch_if_current(ticket, action)? {
                DispatchOutcome::Applied { changed } => {
                    info!(product_id = %product.id, bid = %bid_price, changed, "Bid accepted");
                    Ok(BidReceipt {
                        message,
                        bid_price,
                        cart: store.with_state(|s| CartResponse::from_state(s, config)),
                    })
                }
                DispatchOutcome::Stale => Err(ApiError::stale("Bid")),
            }
        }
        BidOutcome::Rejected { message } => {
            warn!(product_id = %product.id, bid = %bid_price, reason = %message, "Bid rejected");
            Err(ApiError::bid_rejected(message))
        }
    }
}
