//! Auth-state notification stream.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth service pushes a notification on every session transition. The
//! `AuthEvents` seam hides the transport so the session guard can be driven
//! by the hosted backend in the browser and by a bare `AuthHub` in tests.
//!
//! DELIVERY
//! ========
//! - Handlers run outside the hub lock, in registration order.
//! - A handler subscribed after the first determination gets
//!   `INITIAL_SESSION` synchronously, before `subscribe` returns.
//! - Handlers subscribed earlier get `INITIAL_SESSION` when `determine` runs.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::types::{AuthChange, AuthEvent, Session};
use crate::error::ServiceError;

/// Token returned by [`AuthEvents::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked for every auth-state notification.
pub type AuthHandler = Arc<dyn Fn(&AuthChange) + Send + Sync>;

/// Observer interface over the auth-state notification stream.
pub trait AuthEvents: Send + Sync {
    /// Register `handler` for all future notifications.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Subscribe`] when the listener cannot be registered.
    fn subscribe(&self, handler: AuthHandler) -> Result<SubscriptionId, ServiceError>;

    /// Release a subscription. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    handlers: Vec<(SubscriptionId, AuthHandler)>,
    /// `None` until the first determination; then the current session.
    current: Option<Option<Session>>,
}

/// In-process fan-out of auth-state notifications.
#[derive(Default)]
pub struct AuthHub {
    inner: Mutex<HubInner>,
}

impl AuthHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current session, if determined and present.
    pub fn session(&self) -> Option<Session> {
        self.lock().current.clone().flatten()
    }

    /// Whether the first determination has happened.
    pub fn is_determined(&self) -> bool {
        self.lock().current.is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().handlers.len()
    }

    /// Record the initial session state and announce it as `INITIAL_SESSION`.
    ///
    /// No-op once anything has been determined or emitted, so a slow restore
    /// never overrides an explicit sign-in or sign-out.
    pub fn determine(&self, session: Option<Session>) {
        let handlers = {
            let mut inner = self.lock();
            if inner.current.is_some() {
                return;
            }
            inner.current = Some(session.clone());
            inner.handlers.iter().map(|(_, h)| h.clone()).collect::<Vec<_>>()
        };
        log::debug!("auth: initial session determined (present={})", session.is_some());
        let change = AuthChange::new(AuthEvent::InitialSession, session);
        for handler in handlers {
            handler(&change);
        }
    }

    /// Record a session transition and notify every subscriber.
    pub fn emit(&self, event: AuthEvent, session: Option<Session>) {
        let handlers = {
            let mut inner = self.lock();
            inner.current = Some(session.clone());
            inner.handlers.iter().map(|(_, h)| h.clone()).collect::<Vec<_>>()
        };
        log::debug!("auth: {} (subscribers={})", event.as_str(), handlers.len());
        let change = AuthChange::new(event, session);
        for handler in handlers {
            handler(&change);
        }
    }
}

impl AuthEvents for AuthHub {
    fn subscribe(&self, handler: AuthHandler) -> Result<SubscriptionId, ServiceError> {
        let (id, initial) = {
            let mut inner = self.lock();
            inner.next_id += 1;
            let id = SubscriptionId(inner.next_id);
            inner.handlers.push((id, handler.clone()));
            (id, inner.current.clone())
        };
        if let Some(session) = initial {
            handler(&AuthChange::new(AuthEvent::InitialSession, session));
        }
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().handlers.retain(|(sid, _)| *sid != id);
    }
}
