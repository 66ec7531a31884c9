//! # Auth Session
//!
//! Who is logged in, as far as this client knows.
//!
//! The session itself lives in the backend's HttpOnly cookie; this holder
//! only mirrors the email the backend reported. It is independent of the
//! checkout state: logging out does not empty the cart.

use serde::Serialize;
use tracing::debug;

use artbid_core::dto::{AuthCheck, AuthResponse};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    email: Option<String>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, email: impl Into<String>) {
        let email = email.into();
        debug!(email = %email, "Session logged in");
        self.email = Some(email);
    }

    pub fn logout(&mut self) {
        debug!("Session logged out");
        self.email = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.email.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Adopts a successful login/register answer.
    ///
    /// Falls back to `requested_email` when the answer does not echo one.
    pub fn apply_auth(&mut self, response: &AuthResponse, requested_email: &str) {
        if response.success {
            self.login(response.email.as_deref().unwrap_or(requested_email));
        }
    }

    /// Syncs with `GET /auth/check`.
    pub fn apply_check(&mut self, check: &AuthCheck) {
        match (check.authenticated, check.email.as_deref()) {
            (true, Some(email)) => self.login(email),
            (true, None) => {}
            (false, _) => self.logout(),
        }
    }
}
