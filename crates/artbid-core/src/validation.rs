//! # Validation Module
//!
//! Form validation for the storefront: shipping address, registration, bid
//! amount and the three payment forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form fields (THIS MODULE)                                    │
//! │  ├── validate_field(name, value) → message shown next to the input    │
//! │  └── whole-form helpers → FieldErrors                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Typed values                                                 │
//! │  ├── Money / BidPrice parsing (positive, two decimals)                 │
//! │  └── PaymentIntentId (non-blank)                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Rejects bids under the listed price, incomplete orders            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The checkout store never validates. A form is checked here first and only
//! a clean form is turned into a transition.
//!
//! ## Usage
//! ```rust
//! use artbid_core::validation::validate_field;
//!
//! assert_eq!(validate_field("email", "", None), Some("Email is required"));
//! assert_eq!(validate_field("email", "a@b.dk", None), None);
//! assert_eq!(validate_field("nickname", "", None), None);
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::dto::{ArtistProfile, RegisterUser};
use crate::error::{CoreError, CoreResult};
use crate::payment::{CreditCardForm, GiftCardForm, MobilePayForm, PaymentMethod};
use crate::types::Address;

/// Raw form input keyed by field name.
pub type FormValues = BTreeMap<String, String>;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

// =============================================================================
// Field Errors
// =============================================================================

/// Per-field error messages, keyed by the form's field name.
///
/// Ordered by field name so summaries and JSON output are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors(BTreeMap::new())
    }

    /// Records an error for a field, replacing any earlier one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Records `message` for `field` if one is present.
    fn check(&mut self, field: &str, message: Option<&str>) {
        if let Some(message) = message {
            self.insert(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// "field: message; field: message"
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `Ok(())` when clean, otherwise [`CoreError::InvalidForm`].
    pub fn into_result(self) -> CoreResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidForm(self))
        }
    }
}

// =============================================================================
// Single Field Rules
// =============================================================================

/// Fields that only need to be non-blank.
const REQUIRED_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "address1",
    "city",
    "postalCode",
    "mobileNr",
    "bio",
    "style",
];

/// Validates one form field.
///
/// `form` is the rest of the form, needed only by `rePassword` (which is
/// compared against `password`). Unknown field names never produce an error.
///
/// ## Returns
/// The message to show next to the input, or `None` if the value is fine.
pub fn validate_field(name: &str, value: &str, form: Option<&FormValues>) -> Option<&'static str> {
    let blank = value.trim().is_empty();

    if REQUIRED_FIELDS.contains(&name) {
        return blank.then_some("This field is required");
    }

    match name {
        "email" => {
            if blank {
                Some("Email is required")
            } else if !is_email(value) {
                Some("Please enter a valid email")
            } else {
                None
            }
        }
        "password" => {
            if value.is_empty() {
                Some("Password is required")
            } else if value.chars().count() < MIN_PASSWORD_LEN {
                Some("Password must be at least 8 characters")
            } else {
                None
            }
        }
        "rePassword" => {
            let password = form
                .and_then(|f| f.get("password"))
                .map(String::as_str)
                .unwrap_or("");
            (value != password).then_some("Passwords do not match")
        }
        "bidAmount" => {
            if blank {
                Some("This field is required")
            } else if !is_positive_number(value) {
                Some("Bid must be greater than 0")
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Validates every field present in `form`.
pub fn validate_all_fields(form: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (name, value) in form {
        errors.check(name, validate_field(name, value, Some(form)));
    }
    errors
}

/// `local@domain.tld`: one `@`, no whitespace, a dot inside the domain.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Any finite number above zero ("1", "0.5", "250.00").
fn is_positive_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|n| n.is_finite() && n > 0.0)
        .unwrap_or(false)
}

fn all_digits(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

// =============================================================================
// Whole Forms
// =============================================================================

/// Validates a shipping address.
///
/// Country and the second address line are optional.
pub fn validate_address(address: &Address) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (name, value) in [
        ("firstName", &address.first_name),
        ("lastName", &address.last_name),
        ("email", &address.email),
        ("mobileNr", &address.mobile_nr),
        ("postalCode", &address.postal_code),
        ("city", &address.city),
        ("address1", &address.address1),
    ] {
        errors.check(name, validate_field(name, value, None));
    }
    errors
}

/// Validates a registration form.
///
/// The artist profile is only checked for artist accounts.
pub fn validate_registration(
    user: &RegisterUser,
    re_password: &str,
    artist: Option<&ArtistProfile>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check("firstName", validate_field("firstName", &user.first_name, None));
    errors.check("email", validate_field("email", &user.email, None));
    errors.check("password", validate_field("password", &user.password, None));
    if re_password != user.password {
        errors.insert("rePassword", "Passwords do not match");
    }
    if let Some(artist) = artist {
        errors.check("bio", validate_field("bio", &artist.bio, None));
        errors.check("style", validate_field("style", &artist.style, None));
    }
    errors
}

// =============================================================================
// Payment Forms
// =============================================================================

/// Dispatches to the validator for the selected method.
pub fn validate_payment(method: &PaymentMethod) -> FieldErrors {
    match method {
        PaymentMethod::CreditCard(form) => validate_credit_card(form),
        PaymentMethod::GiftCard(form) => validate_gift_card(form),
        PaymentMethod::MobilePay(form) => validate_mobile_pay(form),
    }
}

/// Validates a credit card form.
///
/// ## Rules
/// - Card number: 13-19 digits, whitespace between groups is ignored
/// - Expiry month: `01`-`12`
/// - Expiry year: two digits
/// - CVC: 3-4 digits
/// - Card holder: required
pub fn validate_credit_card(form: &CreditCardForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let number: String = form.card_number.chars().filter(|c| !c.is_whitespace()).collect();
    if number.is_empty() {
        errors.insert("cardNumber", "Card number is required");
    } else if !(13..=19).contains(&number.len()) || !all_digits(&number) {
        errors.insert("cardNumber", "Invalid card number, It should be 13-19 digits");
    }

    let month = form.expiry_month.as_str();
    if month.trim().is_empty() {
        errors.insert("expiryMonth", "Expiry month is required");
    } else if !is_month(month) {
        errors.insert("expiryMonth", "Invalid expiry month");
    }

    let year = form.expiry_year.as_str();
    if year.trim().is_empty() {
        errors.insert("expiryYear", "Expiry year is required");
    } else if year.len() != 2 || !all_digits(year) {
        errors.insert("expiryYear", "Invalid expiry year");
    }

    let cvc = form.cvc_number.as_str();
    if cvc.trim().is_empty() {
        errors.insert("cvcNumber", "CVC is required");
    } else if !(3..=4).contains(&cvc.len()) || !all_digits(cvc) {
        errors.insert("cvcNumber", "Invalid CVC, It should be 3-4 digits");
    }

    if form.card_holder.trim().is_empty() {
        errors.insert("cardHolder", "Name on card is required");
    }

    errors
}

/// `01` through `12`, always two digits.
fn is_month(value: &str) -> bool {
    value.len() == 2
        && all_digits(value)
        && value.parse::<u8>().map(|m| (1..=12).contains(&m)).unwrap_or(false)
}

/// Validates a gift card form.
pub fn validate_gift_card(form: &GiftCardForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let number = form.gift_card_number.as_str();
    if number.trim().is_empty() {
        errors.insert("giftCardNumber", "Gift card number is required");
    } else if !(8..=20).contains(&number.len()) || !number.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.insert(
            "giftCardNumber",
            "Invalid gift card number, It must be 8-20 characters",
        );
    }

    if form.security_code.trim().is_empty() {
        errors.insert("securityCode", "Gift card code is required");
    }

    errors
}

/// Validates a MobilePay form: optional `+`, then 10-15 digits.
pub fn validate_mobile_pay(form: &MobilePayForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let phone = form.phone_number.as_str();
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if phone.trim().is_empty() {
        errors.insert("phoneNumber", "Phone number is required");
    } else if !(10..=15).contains(&digits.len()) || !all_digits(digits) {
        errors.insert("phoneNumber", "Invalid phone number, It must be 10-15 digits");
    }

    errors
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountType;

    fn address() -> Address {
        Address {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            mobile_nr: "+4512345678".into(),
            country: "Denmark".into(),
            postal_code: "2800".into(),
            city: "Lyngby".into(),
            address1: "Anker Engelunds Vej 1".into(),
            address2: String::new(),
        }
    }

    #[test]
    fn test_required_fields() {
        for field in REQUIRED_FIELDS {
            assert_eq!(
                validate_field(field, "   ", None),
                Some("This field is required"),
                "{field}"
            );
            assert_eq!(validate_field(field, "x", None), None);
        }
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_field("email", "", None), Some("Email is required"));
        for bad in ["plain", "a@b", "a b@c.dk", "@c.dk", "a@.dk", "a@dk.", "a@b@c.dk"] {
            assert_eq!(
                validate_field("email", bad, None),
                Some("Please enter a valid email"),
                "{bad}"
            );
        }
        assert_eq!(validate_field("email", "ada@example.com", None), None);
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_field("password", "", None), Some("Password is required"));
        assert_eq!(
            validate_field("password", "short", None),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(validate_field("password", "longenough", None), None);
    }

    #[test]
    fn test_re_password_compares_with_form() {
        let mut form = FormValues::new();
        form.insert("password".into(), "secret123".into());
        assert_eq!(validate_field("rePassword", "secret123", Some(&form)), None);
        assert_eq!(
            validate_field("rePassword", "other", Some(&form)),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_bid_amount_rules() {
        assert_eq!(validate_field("bidAmount", "", None), Some("This field is required"));
        assert_eq!(
            validate_field("bidAmount", "0", None),
            Some("Bid must be greater than 0")
        );
        assert_eq!(
            validate_field("bidAmount", "abc", None),
            Some("Bid must be greater than 0")
        );
        assert_eq!(validate_field("bidAmount", "250", None), None);
    }

    #[test]
    fn test_unknown_field_has_no_error() {
        assert_eq!(validate_field("nickname", "", None), None);
    }

    #[test]
    fn test_validate_all_fields() {
        let mut form = FormValues::new();
        form.insert("email".into(), "nope".into());
        form.insert("password".into(), "secret123".into());
        form.insert("rePassword".into(), "secret124".into());
        form.insert("city".into(), "Lyngby".into());

        let errors = validate_all_fields(&form);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("Please enter a valid email"));
        assert_eq!(errors.get("rePassword"), Some("Passwords do not match"));
        assert_eq!(
            errors.summary(),
            "email: Please enter a valid email; rePassword: Passwords do not match"
        );
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address(&address()).is_empty());

        let mut incomplete = address();
        incomplete.city.clear();
        incomplete.country.clear();
        incomplete.email = "broken".into();
        let errors = validate_address(&incomplete);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("city"), Some("This field is required"));
        assert!(matches!(
            errors.into_result(),
            Err(CoreError::InvalidForm(_))
        ));
    }

    #[test]
    fn test_validate_registration() {
        let user = RegisterUser {
            first_name: "Ida".into(),
            last_name: "Holm".into(),
            email: "ida@example.com".into(),
            password: "secret123".into(),
            account_type: AccountType::Artist,
        };
        let artist = ArtistProfile {
            first_name: "Ida".into(),
            last_name: "Holm".into(),
            bio: String::new(),
            style: "Abstract".into(),
        };

        let errors = validate_registration(&user, "secret123", Some(&artist));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("bio"), Some("This field is required"));

        assert!(validate_registration(&user, "secret123", None).is_empty());
        assert_eq!(
            validate_registration(&user, "x", None).get("rePassword"),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_credit_card() {
        let mut form = CreditCardForm {
            card_number: "4111 1111 1111 1111".into(),
            expiry_month: "09".into(),
            expiry_year: "27".into(),
            cvc_number: "123".into(),
            card_holder: "Ada Lovelace".into(),
        };
        assert!(validate_credit_card(&form).is_empty());

        form.card_number = "4111".into();
        form.expiry_month = "13".into();
        form.expiry_year = "2027".into();
        form.cvc_number = "12".into();
        form.card_holder = " ".into();
        let errors = validate_credit_card(&form);
        assert_eq!(
            errors.get("cardNumber"),
            Some("Invalid card number, It should be 13-19 digits")
        );
        assert_eq!(errors.get("expiryMonth"), Some("Invalid expiry month"));
        assert_eq!(errors.get("expiryYear"), Some("Invalid expiry year"));
        assert_eq!(errors.get("cvcNumber"), Some("Invalid CVC, It should be 3-4 digits"));
        assert_eq!(errors.get("cardHolder"), Some("Name on card is required"));

        let empty = validate_credit_card(&CreditCardForm::default());
        assert_eq!(empty.get("cardNumber"), Some("Card number is required"));
        assert_eq!(empty.get("expiryMonth"), Some("Expiry month is required"));
        assert_eq!(empty.get("cvcNumber"), Some("CVC is required"));
    }

    #[test]
    fn test_expiry_month_bounds() {
        assert!(is_month("01"));
        assert!(is_month("12"));
        assert!(!is_month("00"));
        assert!(!is_month("1"));
    }

    #[test]
    fn test_gift_card() {
        let ok = GiftCardForm {
            gift_card_number: "GIFT2024ABC".into(),
            security_code: "1234".into(),
        };
        assert!(validate_gift_card(&ok).is_empty());

        let bad = GiftCardForm {
            gift_card_number: "GIFT-24".into(),
            security_code: String::new(),
        };
        let errors = validate_gift_card(&bad);
        assert_eq!(
            errors.get("giftCardNumber"),
            Some("Invalid gift card number, It must be 8-20 characters")
        );
        assert_eq!(errors.get("securityCode"), Some("Gift card code is required"));
    }

    #[test]
    fn test_mobile_pay() {
        let form = |phone: &str| MobilePayForm {
            phone_number: phone.into(),
        };
        assert!(validate_mobile_pay(&form("+4512345678")).is_empty());
        assert!(validate_mobile_pay(&form("4512345678901")).is_empty());
        assert_eq!(
            validate_mobile_pay(&form("")).get("phoneNumber"),
            Some("Phone number is required")
        );
        assert_eq!(
            validate_mobile_pay(&form("12345")).get("phoneNumber"),
            Some("Invalid phone number, It must be 10-15 digits")
        );
        assert!(!validate_mobile_pay(&form("++4512345678")).is_empty());
    }
}
