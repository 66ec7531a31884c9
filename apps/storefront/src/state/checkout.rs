//! # Checkout Store
//!
//! The one owner of the in-progress order.
//!
//! ## Thread Safety
//! The state is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several commands read and change the checkout
//! 2. Only one transition may run at a time
//! 3. Backend answers arrive on tokio tasks
//!
//! The lock is held for one transition only, never across an `.await`.
//!
//! ## Stale Results
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Request Tickets                                      │
//! │                                                                         │
//! │  place_bid()                        user navigates away                 │
//! │     │                                      │                            │
//! │     ├─ begin_request() ─► ticket(gen 4)    │                            │
//! │     │                                      ▼                            │
//! │     ├─ POST /checkout/placebid ...    invalidate() ─► gen 5             │
//! │     │                                                                   │
//! │     └─ dispatch_if_current(ticket, AddToCart)                           │
//! │            gen 4 != gen 5 ──► Stale (logged, state untouched)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use artbid_core::{CheckoutAction, CheckoutPolicy, CheckoutState, CoreResult};

/// Handle to the shared checkout state.
///
/// Cloning is cheap and every clone sees the same state.
#[derive(Debug, Clone, Default)]
pub struct CheckoutStore {
    state: Arc<Mutex<CheckoutState>>,
    policy: CheckoutPolicy,
    generation: Arc<AtomicU64>,
}

/// Captured store generation at the start of an async request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

/// What happened to a ticketed dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The transition ran. `changed` is false for no-ops such as a duplicate add.
    Applied { changed: bool },
    /// The ticket was older than the store; nothing ran.
    Stale,
}

impl CheckoutStore {
    pub fn new(policy: CheckoutPolicy) -> Self {
        CheckoutStore {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> CheckoutPolicy {
        self.policy
    }

    fn lock(&self) -> MutexGuard<'_, CheckoutState> {
        // A panic mid-transition cannot leave a half-applied state, so a
        // poisoned lock still guards a consistent value.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs one transition.
    ///
    /// ## Returns
    /// `true` if the state changed.
    ///
    /// ## Errors
    /// [`artbid_core::CoreError::OutOfOrder`] when the sequential policy
    /// refuses the action. The state is untouched in that case.
    pub fn dispatch(&self, action: CheckoutAction) -> CoreResult<bool> {
        let mut state = self.lock();
        self.policy.check(&state, &action)?;

        let name = action.name();
        let changed = state.apply(action);
        debug!(
            action = name,
            changed,
            step = %state.step(),
            lines = state.line_count(),
            "Checkout transition"
        );
        Ok(changed)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> CheckoutState {
        self.lock().clone()
    }

    /// Reads the state under the lock.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CheckoutState) -> R,
    {
        f(&self.lock())
    }

    // =========================================================================
    // Generations
    // =========================================================================

    /// Starts an async request whose result may be dropped later.
    pub fn begin_request(&self) -> RequestTicket {
        RequestTicket {
            generation: self.generation.load(Ordering::SeqCst),
        }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.generation == self.generation.load(Ordering::SeqCst)
    }

    /// Makes every outstanding ticket stale.
    ///
    /// Called when the user leaves the step a request belongs to.
    pub fn invalidate(&self) {
        let previous = self.generation.fetch_add(1, Ordering::SeqCst);
        debug!(generation = previous + 1, "Checkout requests invalidated");
    }

    /// Runs `action` only if no [`invalidate`](Self::invalidate) happened
    /// since `ticket` was taken.
    ///
    /// The generation is compared while the state lock is held, so a
    /// concurrent dispatch cannot slip in between the check and the apply.
    pub fn dispatch_if_current(
        &self,
        ticket: RequestTicket,
        action: CheckoutAction,
    ) -> CoreResult<DispatchOutcome> {
        let mut state = self.lock();
        if !self.is_current(ticket) {
            debug!(
                action = action.name(),
                ticket = ticket.generation,
                "Dropping stale checkout result"
            );
            return Ok(DispatchOutcome::Stale);
        }

        self.policy.check(&state, &action)?;
        let name = action.name();
        let changed = state.apply(action);
        debug!(action = name, changed, step = %state.step(), "Checkout transition");
        Ok(DispatchOutcome::Applied { changed })
    }
}
