//! # Order Command
//!
//! Turns the finished checkout into an order.
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  to_order_request() ── incomplete ──► CHECKOUT_INCOMPLETE               │
//! │         │                             (cart, address, payment intent)   │
//! │         ▼                                                               │
//! │  POST /checkout/placeorder                                              │
//! │         │                                                               │
//! │         ├── success: true ──► Reset + invalidate ──► OrderReceipt       │
//! │         ├── success: false ─► UPSTREAM (backend error text)             │
//! │         └── request failed ─► "Failed to submit order"                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use artbid_client::StorefrontApi;
use artbid_core::{CheckoutAction, PaymentIntentId};

use crate::error::{ApiError, ErrorCode};
use crate::state::{CheckoutStore, ConfigState};

const ORDER_FAILED_MESSAGE: &str = "Failed to submit order";

/// Confirmation of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    /// Backend confirmation, e.g. "OrderId 12 placed successfully."
    pub message: String,
    pub line_count: usize,
    pub formatted_total: String,
    pub shipping_to: String,
    pub payment_intent_id: PaymentIntentId,
}

/// Submits the checkout as an order.
///
/// On success the checkout is reset and every in-flight request is
/// invalidated, so a late bid answer cannot refill the cart of a placed
/// order. The reset is not ticketed: a placed order always clears the cart.
pub async fn submit_order(
    api: &StorefrontApi,
    store: &CheckoutStore,
    config: &ConfigState,
) -> Result<OrderReceipt, ApiError> {
    debug!("submit_order command");

    let (request, formatted_total) = store.with_state(|s| {
        s.to_order_request()
            .map(|r| (r, config.format_price(s.total(), s.currency())))
    })?;

    let response = api
        .place_order(&request)
        .await
        .map_err(|e| ApiError::from_client(e, ORDER_FAILED_MESSAGE))?;

    if !response.success {
        let message = response
            .error
            .or(response.message)
            .unwrap_or_else(|| ORDER_FAILED_MESSAGE.to_string());
        warn!(reason = %message, "Order refused");
        return Err(ApiError::new(ErrorCode::Upstream, message));
    }

    store.dispatch(CheckoutAction::Reset)?;
    store.invalidate();

    let receipt = OrderReceipt {
        message: response
            .message
            .unwrap_or_else(|| "Order placed successfully.".to_string()),
        line_count: request.cart.len(),
        formatted_total,
        shipping_to: request.address.summary(),
        payment_intent_id: request.payment_intent_id,
    };
    info!(lines = receipt.line_count, total = %receipt.formatted_total, "Order placed");
    Ok(receipt)
}
