//! # Payment Module
//!
//! Payment method forms and mocked payment authorization.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Payment Step                                    │
//! │                                                                         │
//! │  1. User picks a method       ┌─────────────┬───────────┬───────────┐  │
//! │                               │ Credit Card │ Gift Card │ MobilePay │  │
//! │                               └──────┬──────┴─────┬─────┴─────┬─────┘  │
//! │  2. Form is validated                └────────────┼───────────┘        │
//! │                                                   ▼                     │
//! │  3. A mock intent is minted      "pay_1758540000000_123456"            │
//! │                                                   │                     │
//! │  4. SetPaymentIntent is dispatched ◄──────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no payment gateway. The intent id only proves that the payment
//! step was completed with a well-formed form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::types::PaymentIntentId;
use crate::validation::validate_payment;

/// Prefix of every mock payment intent id.
pub const PAYMENT_INTENT_PREFIX: &str = "pay_";

/// Upper bound (exclusive) of the random suffix.
const INTENT_SUFFIX_RANGE: u128 = 1_000_000;

// =============================================================================
// Forms
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditCardForm {
    pub card_number: String,
    /// Two digits, "01"-"12".
    pub expiry_month: String,
    /// Two digits, e.g. "27".
    pub expiry_year: String,
    pub cvc_number: String,
    pub card_holder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct GiftCardForm {
    pub gift_card_number: String,
    pub security_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct MobilePayForm {
    pub phone_number: String,
}

// =============================================================================
// Payment Method
// =============================================================================

/// The selected payment method together with its form.
///
/// ## JSON Shape
/// ```json
/// { "method": "mobile_pay", "phoneNumber": "+4512345678" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard(CreditCardForm),
    GiftCard(GiftCardForm),
    MobilePay(MobilePayForm),
}

impl PaymentMethod {
    /// Label shown on the payment options.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard(_) => "Credit Card",
            PaymentMethod::GiftCard(_) => "Gift Card",
            PaymentMethod::MobilePay(_) => "MobilePay",
        }
    }

    /// Validates the form and, if it is clean, mints a mock intent.
    ///
    /// ## Errors
    /// [`crate::CoreError::InvalidForm`] with the per-field messages.
    pub fn authorize(&self) -> CoreResult<PaymentIntentId> {
        validate_payment(self).into_result()?;
        Ok(create_mock_payment_intent())
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Mock Intents
// =============================================================================

/// Mints `pay_<unix-millis>_<0..999999>` for the current time.
pub fn create_mock_payment_intent() -> PaymentIntentId {
    let suffix = (Uuid::new_v4().as_u128() % INTENT_SUFFIX_RANGE) as u32;
    mock_payment_intent_at(Utc::now(), suffix)
}

/// Deterministic form of [`create_mock_payment_intent`].
///
/// ```rust
/// use artbid_core::payment::mock_payment_intent_at;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.timestamp_millis_opt(1_758_540_000_000).unwrap();
/// assert_eq!(mock_payment_intent_at(at, 42).as_str(), "pay_1758540000000_42");
/// ```
pub fn mock_payment_intent_at(at: DateTime<Utc>, suffix: u32) -> PaymentIntentId {
    PaymentIntentId::from_non_blank(format!(
        "{}{}_{}",
        PAYMENT_INTENT_PREFIX,
        at.timestamp_millis(),
        suffix
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::TimeZone;

    #[test]
    fn test_mock_intent_shape() {
        let intent = create_mock_payment_intent();
        let rest = intent.as_str().strip_prefix("pay_").unwrap();
        let (millis, suffix) = rest.split_once('_').unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
        assert!(suffix.parse::<u32>().unwrap() < 1_000_000);
    }

    #[test]
    fn test_mock_intent_at_fixed_time() {
        let at = Utc.timestamp_millis_opt(1_000).unwrap();
        assert_eq!(mock_payment_intent_at(at, 7).as_str(), "pay_1000_7");
    }

    #[test]
    fn test_authorize_rejects_invalid_form() {
        let method = PaymentMethod::MobilePay(MobilePayForm {
            phone_number: "123".into(),
        });
        match method.authorize() {
            Err(CoreError::InvalidForm(errors)) => {
                assert!(errors.get("phoneNumber").is_some());
            }
            other => panic!("expected InvalidForm, got {other:?}"),
        }
    }

    #[test]
    fn test_authorize_mints_intent() {
        let method = PaymentMethod::GiftCard(GiftCardForm {
            gift_card_number: "ABCD1234".into(),
            security_code: "99".into(),
        });
        let intent = method.authorize().unwrap();
        assert!(intent.as_str().starts_with(PAYMENT_INTENT_PREFIX));
    }

    #[test]
    fn test_payment_method_json() {
        let method: PaymentMethod = serde_json::from_str(
            r#"{"method":"credit_card","cardNumber":"4111111111111","cardHolder":"A"}"#,
        )
        .unwrap();
        assert_eq!(method.label(), "Credit Card");
        match method {
            PaymentMethod::CreditCard(form) => {
                assert_eq!(form.card_number, "4111111111111");
                assert!(form.cvc_number.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
