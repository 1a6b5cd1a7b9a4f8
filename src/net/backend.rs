//! The hosted backend as seen by this client.
//!
//! Views only talk to `dyn Backend`; the browser build plugs in
//! [`HostedBackend`](super::hosted::HostedBackend), tests plug in a recording
//! fake. Futures are `?Send` because browser fetch futures are not.

use std::sync::Arc;

use async_trait::async_trait;

use super::events::AuthEvents;
use super::query::Query;
use super::types::{Session, User};
use crate::error::ServiceError;

/// Shared handle provided through Leptos context.
pub type SharedBackend = Arc<dyn Backend>;

#[async_trait(?Send)]
pub trait Backend: AuthEvents {
    /// The signed-in user, or `None` without an active session.
    async fn current_user(&self) -> Result<Option<User>, ServiceError>;

    /// Password sign-in. Emits `SIGNED_IN` on success.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ServiceError>;

    /// Create an account. Returns a session when the backend signs the user in
    /// immediately (no email confirmation), emitting `SIGNED_IN`.
    async fn sign_up(&self, email: &str, password: &str, username: &str) -> Result<Option<Session>, ServiceError>;

    /// End the session. Emits `SIGNED_OUT`.
    async fn sign_out(&self) -> Result<(), ServiceError>;

    /// Run a read; returns the raw JSON (array, or object for single-row reads).
    async fn query(&self, query: &Query) -> Result<serde_json::Value, ServiceError>;

    async fn insert_row(&self, table: &str, record: serde_json::Value) -> Result<(), ServiceError>;

    async fn upload_object(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: &str)
    -> Result<(), ServiceError>;

    /// Storage bucket that holds post images.
    fn bucket(&self) -> &str;

    /// Public URL for a stored object. Pure string construction, no request.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}
