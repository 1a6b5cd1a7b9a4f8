//! Session guard: gates protected routes on an active auth session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route except `/auth` renders inside the `SessionGuard` component.
//! The component mounts one subscription on the auth notification stream
//! and renders from the phase this module computes.
//!
//! STATE MACHINE
//! =============
//! `Undetermined` is initial. The first notification moves to
//! `Authenticated` (session present) or `Unauthenticated` (absent, plus a
//! redirect to the login route). `Authenticated` can still drop to
//! `Unauthenticated` when a later notification carries no session.
//! `Unauthenticated` is terminal: later session-less notifications redirect
//! again, later sessions are ignored. `Failed` is entered only when the
//! subscription itself cannot be registered.
//!
//! LIFETIME
//! ========
//! [`GuardSubscription`] owns the registration. Releasing it (or dropping
//! it) unsubscribes and flips a shared flag the handler checks first, so a
//! notification already in flight when the view unmounts has no effect.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::ServiceError;
use crate::net::events::{AuthEvents, SubscriptionId};
use crate::net::types::AuthChange;

/// Route unauthenticated viewers are sent to.
pub const LOGIN_PATH: &str = "/auth";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GuardPhase {
    /// No notification yet. Render a placeholder, never the children.
    #[default]
    Undetermined,
    Authenticated,
    Unauthenticated,
    /// The subscription could not be registered.
    Failed(String),
}

impl GuardPhase {
    /// Whether an auth determination has been received.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Authenticated | Self::Unauthenticated)
    }

    pub fn shows_children(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// Side effect requested by [`SessionGuard::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardAction {
    None,
    RedirectToLogin,
}

/// Pure guard state, driven one notification at a time.
#[derive(Clone, Debug, Default)]
pub struct SessionGuard {
    phase: GuardPhase,
    ready: bool,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &GuardPhase {
        &self.phase
    }

    /// False until the first notification, true for the rest of the guard's life.
    pub fn ready(&self) -> bool {
        self.ready
    }

    pub fn observe(&mut self, change: &AuthChange) -> GuardAction {
        self.ready = true;
        if change.session.is_none() {
            self.phase = GuardPhase::Unauthenticated;
            return GuardAction::RedirectToLogin;
        }
        if self.phase != GuardPhase::Unauthenticated {
            self.phase = GuardPhase::Authenticated;
        }
        GuardAction::None
    }
}

/// A live guard registration on an [`AuthEvents`] source.
pub struct GuardSubscription {
    events: Arc<dyn AuthEvents>,
    id: Option<SubscriptionId>,
    active: Arc<AtomicBool>,
}

impl GuardSubscription {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Stop reacting and unsubscribe. Idempotent.
    pub fn release(&mut self) {
        self.active.store(false, Ordering::Release);
        if let Some(id) = self.id.take() {
            self.events.unsubscribe(id);
            log::debug!("guard: released subscription {id:?}");
        }
    }
}

impl Drop for GuardSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Subscribe a fresh [`SessionGuard`] to `events`.
///
/// `on_phase` receives the phase after every notification; `navigate` is
/// called with [`LOGIN_PATH`] once per session-less notification. Either
/// may run before this function returns when the source already knows the
/// session.
///
/// # Errors
///
/// Returns the source's error when the subscription cannot be registered.
/// Callers render [`GuardPhase::Failed`] in that case.
pub fn mount_guard<N, P>(
    events: Arc<dyn AuthEvents>,
    navigate: N,
    on_phase: P,
) -> Result<GuardSubscription, ServiceError>
where
    N: Fn(&str) + Send + Sync + 'static,
    P: Fn(GuardPhase) + Send + Sync + 'static,
{
    let active = Arc::new(AtomicBool::new(true));
    let guard = Mutex::new(SessionGuard::new());
    let live = active.clone();

    let id = events.subscribe(Arc::new(move |change: &AuthChange| {
        if !live.load(Ordering::Acquire) {
            return;
        }
        let (phase, action) = {
            let mut guard = guard.lock().unwrap_or_else(PoisonError::into_inner);
            let action = guard.observe(change);
            (guard.phase().clone(), action)
        };
        on_phase(phase);
        if action == GuardAction::RedirectToLogin {
            log::debug!("guard: {} without session, redirecting", change.event.as_str());
            navigate(LOGIN_PATH);
        }
    }))?;

    log::debug!("guard: subscribed {id:?}");
    Ok(GuardSubscription { events, id: Some(id), active })
}
