//! # Cart Commands
//!
//! Viewing and editing the lines of the checkout.
//!
//! Lines are only added by a successful bid (see [`super::bid`]), so there
//! is no add command here.

use serde::Serialize;
use tracing::debug;

use artbid_core::{CartLine, CheckoutAction, CheckoutState, CheckoutStep, ProductId};

use crate::error::ApiError;
use crate::state::{CheckoutStore, ConfigState};

/// Aggregates shown under the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_cents: i64,
    pub currency: String,
    /// e.g. "600.00 DKK"
    pub formatted_total: String,
}

impl CartTotals {
    pub fn from_state(state: &CheckoutState, config: &ConfigState) -> Self {
        let total = state.total();
        CartTotals {
            line_count: state.line_count(),
            total_cents: total.cents(),
            currency: state
                .currency()
                .unwrap_or(&config.currency_code)
                .to_string(),
            formatted_total: config.format_price(total, state.currency()),
        }
    }
}

/// Cart response including lines, totals and how far checkout got.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub step: CheckoutStep,
}

impl CartResponse {
    pub fn from_state(state: &CheckoutState, config: &ConfigState) -> Self {
        CartResponse {
            lines: state.cart().to_vec(),
            totals: CartTotals::from_state(state, config),
            step: state.step(),
        }
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CART                                              2 items             │
/// ├─────────────────────────────────────────────────────────────────────────┤
/// │  Harbour at Dusk        Ida Holm                  600.00 DKK   [x]     │
/// │  Blue Study             Ida Holm                  300.00 DKK   [x]     │
/// ├─────────────────────────────────────────────────────────────────────────┤
/// │  TOTAL                                            900.00 DKK           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(store: &CheckoutStore, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    store.with_state(|s| CartResponse::from_state(s, config))
}

/// Removes a line from the cart.
///
/// Removing a product that is not in the cart leaves it unchanged.
pub fn remove_from_cart(
    store: &CheckoutStore,
    config: &ConfigState,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");
    let removed = store.dispatch(CheckoutAction::remove_from_cart(ProductId::new(product_id)))?;
    if !removed {
        debug!(product_id = %product_id, "Product was not in the cart");
    }
    Ok(get_cart(store, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use artbid_core::{BidPrice, Money, Product};

    fn line(id: &str, currency: &str, bid: &str) -> CheckoutAction {
        let mut product = Product::new(id, "Work", Money::from_cents(100));
        product.currency = currency.to_string();
        CheckoutAction::add_to_cart(product, BidPrice::parse(bid).unwrap())
    }

    #[test]
    fn test_empty_cart_uses_configured_currency() {
        let cart = get_cart(&CheckoutStore::default(), &ConfigState::default());
        assert!(cart.lines.is_empty());
        assert_eq!(cart.totals.formatted_total, "0.00 DKK");
        assert_eq!(cart.step, CheckoutStep::Empty);
    }

    #[test]
    fn test_totals_follow_first_line_currency() {
        let store = CheckoutStore::default();
        store.dispatch(line("1", "EUR", "600")).unwrap();
        store.dispatch(line("2", "EUR", "300.50")).unwrap();

        let cart = get_cart(&store, &ConfigState::default());
        assert_eq!(cart.totals.line_count, 2);
        assert_eq!(cart.totals.total_cents, 90050);
        assert_eq!(cart.totals.currency, "EUR");
        assert_eq!(cart.totals.formatted_total, "900.50 EUR");
    }

    #[test]
    fn test_remove_from_cart() {
        let store = CheckoutStore::default();
        let config = ConfigState::default();
        store.dispatch(line("1", "DKK", "100")).unwrap();
        store.dispatch(line("2", "DKK", "100")).unwrap();

        let cart = remove_from_cart(&store, &config, "1").unwrap();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].product_id().as_str(), "2");

        let unchanged = remove_from_cart(&store, &config, "99").unwrap();
        assert_eq!(unchanged, cart);
    }
}
