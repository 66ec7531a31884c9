//! # Checkout State
//!
//! The in-progress order and the transitions that change it.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Transitions                                 │
//! │                                                                         │
//! │  Action                   Effect                        Edge case       │
//! │  ──────                   ──────                        ─────────       │
//! │                                                                         │
//! │  AddToCart ─────────────► cart.push(line)               duplicate: no-op│
//! │                                                                         │
//! │  RemoveFromCart ────────► cart.retain(id != x)          absent: no-op   │
//! │                                                                         │
//! │  SetAddress ────────────► address = Some(a)             overwrites      │
//! │                                                                         │
//! │  SetPaymentIntent ──────► payment_intent_id = Some(p)   overwrites      │
//! │                                                                         │
//! │  Reset ─────────────────► CheckoutState::default()      always          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`reduce`] is total: every action applies to every state and nothing
//! fails. Step ordering is not the reducer's business. Callers that want it
//! run [`CheckoutPolicy::check`] first.
//!
//! ## Steps
//! ```text
//! Empty ──AddToCart──► HasCart ──SetAddress──► HasAddress ──SetPaymentIntent──► HasPayment
//!   ▲                                                                              │
//!   └──────────────────────────────── Reset (order placed) ◄───────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::dto::{OrderLine, OrderRequest};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Address, BidPrice, CartLine, PaymentIntentId, Product, ProductId};

// =============================================================================
// Checkout State
// =============================================================================

/// The in-progress order.
///
/// ## Invariants
/// - At most one line per product id
/// - Lines keep insertion order (display order)
/// - Every bid price is positive (guaranteed by [`BidPrice`])
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutState {
    cart: Vec<CartLine>,
    address: Option<Address>,
    payment_intent_id: Option<PaymentIntentId>,
}

impl CheckoutState {
    /// The empty initial state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn payment_intent_id(&self) -> Option<&PaymentIntentId> {
        self.payment_intent_id.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.cart.len()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.cart.iter().any(|line| line.product_id() == product_id)
    }

    /// Sum of all bid prices.
    pub fn total(&self) -> Money {
        self.cart.iter().map(|line| line.bid_price.amount()).sum()
    }

    /// Currency of the first line, if it has one.
    pub fn currency(&self) -> Option<&str> {
        self.cart
            .first()
            .map(|line| line.product.currency.as_str())
            .filter(|c| !c.is_empty())
    }

    /// Furthest step reached, checked in the order cart, address, payment.
    pub fn step(&self) -> CheckoutStep {
        if self.cart.is_empty() {
            CheckoutStep::Empty
        } else if self.address.is_none() {
            CheckoutStep::HasCart
        } else if self.payment_intent_id.is_none() {
            CheckoutStep::HasAddress
        } else {
            CheckoutStep::HasPayment
        }
    }

    /// Applies one transition in place.
    ///
    /// ## Returns
    /// `true` if the state changed.
    pub fn apply(&mut self, action: CheckoutAction) -> bool {
        match action {
            CheckoutAction::AddToCart { product, bid_price } => {
                if self.contains(&product.id) {
                    return false;
                }
                self.cart.push(CartLine::new(product, bid_price));
                true
            }
            CheckoutAction::RemoveFromCart { product_id } => {
                let before = self.cart.len();
                self.cart.retain(|line| line.product_id() != &product_id);
                self.cart.len() != before
            }
            CheckoutAction::SetAddress(address) => {
                let changed = self.address.as_ref() != Some(&address);
                self.address = Some(address);
                changed
            }
            CheckoutAction::SetPaymentIntent(intent) => {
                let changed = self.payment_intent_id.as_ref() != Some(&intent);
                self.payment_intent_id = Some(intent);
                changed
            }
            CheckoutAction::Reset => {
                let changed = *self != CheckoutState::default();
                *self = CheckoutState::default();
                changed
            }
        }
    }

    /// Builds the placeorder body.
    ///
    /// ## Errors
    /// [`CoreError::CheckoutIncomplete`] naming every missing part, in the
    /// same situations the backend would reject the order.
    pub fn to_order_request(&self) -> CoreResult<OrderRequest> {
        let mut missing = Vec::new();
        if self.cart.is_empty() {
            missing.push("cart".to_string());
        }
        if self.address.is_none() {
            missing.push("address".to_string());
        }
        if self.payment_intent_id.is_none() {
            missing.push("payment intent".to_string());
        }

        match (&self.address, &self.payment_intent_id) {
            (Some(address), Some(intent)) if missing.is_empty() => Ok(OrderRequest {
                cart: self.cart.iter().map(OrderLine::from).collect(),
                address: address.clone(),
                payment_intent_id: intent.clone(),
            }),
            _ => Err(CoreError::CheckoutIncomplete { missing }),
        }
    }
}

/// Pure transition function: `(state, action) -> state`.
///
/// ```rust
/// use artbid_core::checkout::{reduce, CheckoutAction, CheckoutState};
/// use artbid_core::{BidPrice, Money, Product};
///
/// let product = Product::new("1", "X", Money::from_cents(5000));
/// let bid = BidPrice::parse("100").unwrap();
///
/// let state = reduce(
///     CheckoutState::new(),
///     CheckoutAction::AddToCart { product, bid_price: bid },
/// );
/// assert_eq!(state.line_count(), 1);
/// assert_eq!(reduce(state, CheckoutAction::Reset), CheckoutState::new());
/// ```
pub fn reduce(state: CheckoutState, action: CheckoutAction) -> CheckoutState {
    let mut next = state;
    next.apply(action);
    next
}

// =============================================================================
// Actions
// =============================================================================

/// A named checkout transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutAction {
    #[serde(rename_all = "camelCase")]
    AddToCart { product: Product, bid_price: BidPrice },
    #[serde(rename_all = "camelCase")]
    RemoveFromCart { product_id: ProductId },
    SetAddress(Address),
    SetPaymentIntent(PaymentIntentId),
    Reset,
}

impl CheckoutAction {
    /// Wire name, used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutAction::AddToCart { .. } => "ADD_TO_CART",
            CheckoutAction::RemoveFromCart { .. } => "REMOVE_FROM_CART",
            CheckoutAction::SetAddress(_) => "SET_ADDRESS",
            CheckoutAction::SetPaymentIntent(_) => "SET_PAYMENT_INTENT",
            CheckoutAction::Reset => "RESET",
        }
    }

    pub fn add_to_cart(product: Product, bid_price: BidPrice) -> Self {
        CheckoutAction::AddToCart { product, bid_price }
    }

    pub fn remove_from_cart(product_id: impl Into<ProductId>) -> Self {
        CheckoutAction::RemoveFromCart {
            product_id: product_id.into(),
        }
    }
}

// =============================================================================
// Steps & Policy
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Empty,
    HasCart,
    HasAddress,
    HasPayment,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckoutStep::Empty => "empty",
            CheckoutStep::HasCart => "has_cart",
            CheckoutStep::HasAddress => "has_address",
            CheckoutStep::HasPayment => "has_payment",
        })
    }
}

/// Whether transitions must follow the cart → address → payment order.
///
/// ## Variants
/// - `Permissive`: every action is allowed from every state
/// - `Sequential`: `SetAddress` needs a non-empty cart, `SetPaymentIntent`
///   needs an address. Cart edits and `Reset` are always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutPolicy {
    #[default]
    Permissive,
    Sequential,
}

impl CheckoutPolicy {
    /// Checks `action` against `state` without applying it.
    pub fn check(&self, state: &CheckoutState, action: &CheckoutAction) -> CoreResult<()> {
        if *self == CheckoutPolicy::Permissive {
            return Ok(());
        }

        let allowed = match action {
            CheckoutAction::SetAddress(_) => !state.is_empty(),
            CheckoutAction::SetPaymentIntent(_) => !state.is_empty() && state.address.is_some(),
            CheckoutAction::AddToCart { .. }
            | CheckoutAction::RemoveFromCart { .. }
            | CheckoutAction::Reset => true,
        };

        if allowed {
            Ok(())
        } else {
            Err(CoreError::OutOfOrder {
                action: action.name().to_string(),
                step: state.step().to_string(),
            })
        }
    }
}

impl FromStr for CheckoutPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permissive" => Ok(CheckoutPolicy::Permissive),
            "sequential" => Ok(CheckoutPolicy::Sequential),
            other => Err(ValidationError::InvalidFormat {
                field: "checkoutPolicy".to_string(),
                reason: format!("expected 'permissive' or 'sequential', got '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
