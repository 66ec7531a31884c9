//! # Session State
//!
//! Shared holder for the logged-in user, separate from the checkout.

use std::sync::{Arc, Mutex, MutexGuard};

use artbid_client::AuthSession;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<AuthSession>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AuthSession> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reads the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AuthSession) -> R,
    {
        f(&self.lock())
    }

    /// Changes the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut AuthSession) -> R,
    {
        f(&mut self.lock())
    }

    pub fn email(&self) -> Option<String> {
        self.with_session(|s| s.email().map(str::to_string))
    }
}
