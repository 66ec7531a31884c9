//! # Payment Command
//!
//! The payment step. Payments are mocked: a clean form is enough to get an
//! intent id, and nothing is charged.

use serde::Serialize;
use tracing::{debug, info};

use artbid_core::{CheckoutAction, PaymentIntentId, PaymentMethod};

use crate::error::ApiError;
use crate::state::CheckoutStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub method: &'static str,
    pub payment_intent_id: PaymentIntentId,
}

/// Validates the selected method's form, mints an intent and records it.
///
/// ## Errors
/// - `VALIDATION_ERROR` with the bad fields of the selected form
/// - `OUT_OF_ORDER` under the sequential policy before an address is set
pub fn pay(store: &CheckoutStore, method: &PaymentMethod) -> Result<PaymentReceipt, ApiError> {
    debug!(method = %method, "pay command");

    // Check ordering before minting so a refused step does not burn an intent.
    let probe = CheckoutAction::SetPaymentIntent(PaymentIntentId::new("pending")?);
    store.with_state(|s| store.policy().check(s, &probe))?;

    let intent = method.authorize()?;
    store.dispatch(CheckoutAction::SetPaymentIntent(intent.clone()))?;
    info!(method = method.label(), intent = %intent, "Payment authorized");

    Ok(PaymentReceipt {
        method: method.label(),
        payment_intent_id: intent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use artbid_core::payment::{CreditCardForm, MobilePayForm};
    use artbid_core::CheckoutPolicy;

    #[test]
    fn test_pay_sets_intent() {
        let store = CheckoutStore::default();
        let method = PaymentMethod::MobilePay(MobilePayForm {
            phone_number: "+4512345678901".into(),
        });

        let receipt = pay(&store, &method).unwrap();
        assert_eq!(receipt.method, "MobilePay");
        assert!(receipt.payment_intent_id.as_str().starts_with("pay_"));
        assert_eq!(
            store.snapshot().payment_intent_id(),
            Some(&receipt.payment_intent_id)
        );
    }

    #[test]
    fn test_invalid_card_reports_fields() {
        let store = CheckoutStore::default();
        let method = PaymentMethod::CreditCard(CreditCardForm {
            card_number: "1234".into(),
            ..CreditCardForm::default()
        });

        let err = pay(&store, &method).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.fields.unwrap().get("cardNumber").is_some());
        assert!(store.snapshot().payment_intent_id().is_none());
    }

    #[test]
    fn test_sequential_needs_address() {
        let store = CheckoutStore::new(CheckoutPolicy::Sequential);
        let method = PaymentMethod::MobilePay(MobilePayForm {
            phone_number: "+4512345678901".into(),
        });
        let err = pay(&store, &method).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfOrder);
    }
}
