//! # Domain Types
//!
//! Core domain types used throughout ArtBid.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │    Address      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ProductId) │◄──│  product        │   │  name, email    │       │
//! │  │  title          │   │  bid_price      │   │  phone, city    │       │
//! │  │  secret_price   │   └─────────────────┘   │  address1/2     │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductId     │   │    BidPrice     │   │ PaymentIntentId │       │
//! │  │  opaque string  │   │  Money > 0      │   │  non-blank      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A product's identity is its [`ProductId`] and nothing else. Two cart lines
//! with the same id are the same line, even if the titles differ.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Identity
// =============================================================================

/// Opaque product identity.
///
/// The backend sends integer ids, older front-end fixtures used strings, so
/// deserialization accepts both and normalizes to a string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::new(id)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => ProductId(s),
            Raw::Number(n) => ProductId(n.to_string()),
        })
    }
}

// =============================================================================
// Product
// =============================================================================

/// An artwork listed in the storefront.
///
/// Field names follow the backend's product DTO (`imageUrl`, `secretPrice`,
/// `artistFirstName`, ...). Everything except `id` and `title` is optional on
/// the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,

    pub title: String,

    #[serde(default)]
    pub image_url: String,

    /// Listed price. Bids are compared against it by the backend.
    #[serde(default, with = "crate::money::wire")]
    #[ts(as = "f64")]
    pub secret_price: Money,

    /// ISO currency code, e.g. "DKK".
    #[serde(default)]
    pub currency: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub year_created: Option<String>,

    #[serde(default)]
    pub product_size: Option<String>,

    #[serde(default)]
    pub date_added: Option<String>,

    #[serde(default)]
    pub artist_first_name: Option<String>,

    #[serde(default)]
    pub artist_last_name: Option<String>,

    #[serde(default)]
    pub style: Option<String>,

    /// Sold artworks stay listed but no longer accept bids.
    #[serde(default, deserialize_with = "bool_or_number")]
    pub sold: bool,
}

impl Product {
    /// Creates a product with only identity, title and price set.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, secret_price: Money) -> Self {
        Product {
            id: id.into(),
            title: title.into(),
            image_url: String::new(),
            secret_price,
            currency: String::new(),
            description: String::new(),
            year_created: None,
            product_size: None,
            date_added: None,
            artist_first_name: None,
            artist_last_name: None,
            style: None,
            sold: false,
        }
    }

    /// Returns "First Last" for the artist, skipping missing parts.
    pub fn artist_name(&self) -> String {
        [&self.artist_first_name, &self.artist_last_name]
            .iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Accepts `"2019"` or `2019` for free-form year fields.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// Accepts `true`/`false` or `1`/`0` for the sold flag.
fn bool_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Number(i64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Flag(flag)) => flag,
        Some(Raw::Number(n)) => n != 0,
        None => false,
    })
}

// =============================================================================
// Artist
// =============================================================================

/// An artist profile as listed on the artists page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(default)]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub image_url: String,
}

impl Artist {
    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// =============================================================================
// Bid Price
// =============================================================================

/// A bid amount that is known to be positive.
///
/// Cart lines only ever hold a `BidPrice`, so "every bid in the cart is
/// positive" holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, TS)]
#[ts(export)]
pub struct BidPrice(Money);

impl BidPrice {
    /// Wraps an amount, rejecting zero and negative values.
    pub fn new(amount: Money) -> Result<Self, ValidationError> {
        if !amount.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "bidPrice".to_string(),
            });
        }
        Ok(BidPrice(amount))
    }

    /// Parses user input ("250", "99.50").
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Money::parse_positive(input, "bidPrice").map(BidPrice)
    }

    /// Returns the underlying amount.
    #[inline]
    pub const fn amount(&self) -> Money {
        self.0
    }
}

impl fmt::Display for BidPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for BidPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = Money::deserialize(deserializer)?;
        BidPrice::new(amount).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product plus the bid price accepted for it.
///
/// ## Snapshot Pattern
/// The whole product is kept, not just its id, so the cart can be shown
/// without refetching the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,
    pub bid_price: BidPrice,
}

impl CartLine {
    pub fn new(product: Product, bid_price: BidPrice) -> Self {
        CartLine { product, bid_price }
    }

    /// Identity of this line.
    #[inline]
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }
}

// =============================================================================
// Address
// =============================================================================

/// Shipping contact details.
///
/// No invariants are enforced here: validation happens in the form layer
/// ([`crate::validation::validate_address`]) before the address reaches the
/// checkout store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_nr: String,
    pub country: String,
    pub postal_code: String,
    pub city: String,
    pub address1: String,
    pub address2: String,
}

impl Address {
    /// One-line summary as shown on the order confirmation.
    ///
    /// ```rust
    /// use artbid_core::Address;
    ///
    /// let address = Address {
    ///     first_name: "Ada".into(),
    ///     last_name: "Lovelace".into(),
    ///     address1: "Anker Engelunds Vej 1".into(),
    ///     city: "Lyngby".into(),
    ///     postal_code: "2800".into(),
    ///     country: "Denmark".into(),
    ///     ..Address::default()
    /// };
    /// assert_eq!(
    ///     address.summary(),
    ///     "Ada Lovelace, Anker Engelunds Vej 1, Lyngby, 2800, Denmark"
    /// );
    /// ```
    pub fn summary(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        [
            name.trim(),
            self.address1.trim(),
            self.address2.trim(),
            self.city.trim(),
            self.postal_code.trim(),
            self.country.trim(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

// =============================================================================
// Payment Intent
// =============================================================================

/// Opaque token for a completed (mocked) payment authorization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct PaymentIntentId(String);

impl PaymentIntentId {
    /// Wraps a token, rejecting blank values.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "paymentIntentId".to_string(),
            });
        }
        Ok(PaymentIntentId(id))
    }

    /// For ids built in this crate that cannot be blank.
    pub(crate) fn from_non_blank(id: String) -> Self {
        debug_assert!(!id.trim().is_empty());
        PaymentIntentId(id)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentIntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PaymentIntentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PaymentIntentId::new(raw).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Accounts
// =============================================================================

/// Kind of account created at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    #[default]
    Customer,
    Artist,
}

impl std::str::FromStr for AccountType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(AccountType::Customer),
            "artist" => Ok(AccountType::Artist),
            other => Err(ValidationError::InvalidFormat {
                field: "accountType".to_string(),
                reason: format!("unknown account type '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
