//! # Address Commands
//!
//! The shipping address step.

use tracing::{debug, info};

use artbid_client::StorefrontApi;
use artbid_core::validation::validate_address;
use artbid_core::{Address, CheckoutAction};

use crate::error::ApiError;
use crate::state::{CheckoutStore, DispatchOutcome};

/// Validates `address` and makes it the shipping address.
///
/// ## Errors
/// - `VALIDATION_ERROR` with one message per bad field; the store is untouched
/// - `OUT_OF_ORDER` under the sequential policy while the cart is empty
pub fn save_address(store: &CheckoutStore, address: Address) -> Result<Address, ApiError> {
    debug!("save_address command");
    validate_address(&address).into_result()?;

    store.dispatch(CheckoutAction::SetAddress(address.clone()))?;
    info!(city = %address.city, "Shipping address set");
    Ok(address)
}

/// Fills the shipping address from the one saved with the account.
///
/// The saved address is trusted as is; the backend validated it on save.
pub async fn load_saved_address(
    api: &StorefrontApi,
    store: &CheckoutStore,
) -> Result<Address, ApiError> {
    debug!("load_saved_address command");
    let ticket = store.begin_request();

    let address = api.saved_address().await.map_err(|e| match e.status() {
        Some(403 | 404) => ApiError::not_found("Saved address", "current account"),
        _ => ApiError::from_client(e, "Failed to load saved address"),
    })?;

    match store.dispatch_if_current(ticket, CheckoutAction::SetAddress(address.clone()))? {
        DispatchOutcome::Applied { .. } => Ok(address),
        DispatchOutcome::Stale => Err(ApiError::stale("Saved address")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use artbid_core::{BidPrice, CheckoutPolicy, Money, Product};

    fn valid() -> Address {
        Address {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            mobile_nr: "12345678".into(),
            postal_code: "2100".into(),
            city: "Copenhagen".into(),
            address1: "Main St 1".into(),
            ..Address::default()
        }
    }

    #[test]
    fn test_invalid_address_leaves_store_untouched() {
        let store = CheckoutStore::default();
        let err = save_address(
            &store,
            Address {
                city: String::new(),
                email: "nope".into(),
                ..valid()
            },
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        let fields = err.fields.unwrap();
        assert_eq!(fields.get("city"), Some("This field is required"));
        assert_eq!(fields.get("email"), Some("Please enter a valid email"));
        assert!(store.snapshot().address().is_none());
    }

    #[test]
    fn test_save_address() {
        let store = CheckoutStore::default();
        save_address(&store, valid()).unwrap();
        assert_eq!(store.snapshot().address(), Some(&valid()));
    }

    #[test]
    fn test_sequential_needs_cart_first() {
        let store = CheckoutStore::new(CheckoutPolicy::Sequential);
        let err = save_address(&store, valid()).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfOrder);

        store
            .dispatch(CheckoutAction::add_to_cart(
                Product::new("1", "Work", Money::from_cents(100)),
                BidPrice::parse("10").unwrap(),
            ))
            .unwrap();
        assert!(save_address(&store, valid()).is_ok());
    }
}
