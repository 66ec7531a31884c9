//! # Wire DTOs
//!
//! Request and response bodies exchanged with the storefront backend.
//!
//! ## Endpoints
//! ```text
//! POST /checkout/placebid    BidRequest      → BidResponse
//! POST /checkout/placeorder  OrderRequest    → OrderResponse
//! POST /auth/login           Credentials     → AuthResponse
//! POST /auth/register        Registration    → AuthResponse
//! GET  /auth/check                           → AuthCheck
//! GET  /auth/address                         → SavedAddress
//! GET  /products/{id}                        → ProductEnvelope
//! ```
//!
//! All bodies are camelCase JSON. Amounts are JSON numbers on the wire and
//! [`Money`] everywhere else.

use serde::{Deserialize, Serialize, Serializer};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{AccountType, Address, CartLine, PaymentIntentId, Product, ProductId};

/// Sends numeric ids as JSON numbers, anything else as a string.
///
/// The backend binds `productId` to an integer.
fn product_id_wire<S: Serializer>(id: &ProductId, serializer: S) -> Result<S::Ok, S::Error> {
    match id.as_str().parse::<i64>() {
        Ok(n) => serializer.serialize_i64(n),
        Err(_) => serializer.serialize_str(id.as_str()),
    }
}

// =============================================================================
// Bids
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BidRequest {
    #[serde(serialize_with = "product_id_wire")]
    #[ts(as = "String")]
    pub product_id: ProductId,
    #[serde(with = "crate::money::wire")]
    #[ts(as = "f64")]
    pub amount: Money,
}

/// Bid answer.
///
/// The backend answers 200 `{message}` for an accepted bid and 400
/// `{message}` for a rejected one; other deployments send an explicit
/// `accepted` flag. Both are accepted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct BidResponse {
    pub accepted: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl BidResponse {
    /// Message to show, preferring `message` over `error`.
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(serialize_with = "product_id_wire")]
    #[ts(as = "String")]
    pub product_id: ProductId,
    #[serde(with = "crate::money::wire")]
    #[ts(as = "f64")]
    pub bid_price: Money,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            product_id: line.product_id().clone(),
            bid_price: line.bid_price.amount(),
        }
    }
}

/// The placeorder body. Built only by
/// [`CheckoutState::to_order_request`](crate::checkout::CheckoutState::to_order_request).
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub cart: Vec<OrderLine>,
    pub address: Address,
    pub payment_intent_id: PaymentIntentId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct OrderResponse {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

// =============================================================================
// Catalog
// =============================================================================

/// `GET /products/{id}` wraps the product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub product: Product,
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub account_type: AccountType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ArtistProfile {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub style: String,
}

/// Registration body.
///
/// Artist accounts send `artist`, customer accounts send `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Registration {
    pub user: RegisterUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<ArtistProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct AuthResponse {
    pub success: bool,
    pub message: Option<String>,
    pub email: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct AuthCheck {
    pub authenticated: bool,
    pub email: Option<String>,
}

/// `GET /auth/address` body.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedAddress {
    pub address: Address,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_request_sends_numbers() {
        let request = BidRequest {
            product_id: ProductId::new("7"),
            amount: Money::from_cents(25050),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"productId": 7, "amount": 250.5}));
    }

    #[test]
    fn test_non_numeric_product_id_stays_string() {
        let request = BidRequest {
            product_id: ProductId::new("abc"),
            amount: Money::from_cents(100),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["productId"], "abc");
    }

    #[test]
    fn test_bid_response_variants() {
        let accepted: BidResponse =
            serde_json::from_str(r#"{"message":"Bid for product Id: 1 is accepted."}"#).unwrap();
        assert_eq!(accepted.accepted, None);
        assert_eq!(accepted.text(), Some("Bid for product Id: 1 is accepted."));

        let flagged: BidResponse =
            serde_json::from_str(r#"{"accepted":false,"message":"too low"}"#).unwrap();
        assert_eq!(flagged.accepted, Some(false));

        let error: BidResponse = serde_json::from_str(r#"{"error":"Invalid"}"#).unwrap();
        assert_eq!(error.text(), Some("Invalid"));
    }

    #[test]
    fn test_order_response_failure() {
        let response: OrderResponse = serde_json::from_str(
            r#"{"success":false,"error":"Invalid cart, missing address, or payment intent"}"#,
        )
        .unwrap();
        assert!(!response.success);
        assert!(response.message.is_none());
    }

    #[test]
    fn test_registration_omits_absent_parts() {
        let registration = Registration {
            user: RegisterUser {
                first_name: "Ida".into(),
                last_name: "Holm".into(),
                email: "ida@example.com".into(),
                password: "secret123".into(),
                account_type: AccountType::Customer,
            },
            artist: None,
            address: Some(Address::default()),
        };
        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["user"]["accountType"], "CUSTOMER");
        assert!(json.get("artist").is_none());
        assert!(json.get("address").is_some());
    }

    #[test]
    fn test_product_envelope() {
        let envelope: ProductEnvelope = serde_json::from_str(
            r#"{"message":"Product found","product":{"id":3,"title":"Dune"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.product.id.as_str(), "3");
    }
}
