//! In-memory `Backend` that records every call, for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::backend::Backend;
use super::events::{AuthEvents, AuthHandler, AuthHub, SubscriptionId};
use super::query::Query;
use super::types::{AuthEvent, Session, User};
use crate::error::ServiceError;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    CurrentUser,
    SignIn(String),
    SignUp(String),
    SignOut,
    Query(Query),
    Insert { table: String, record: serde_json::Value },
    Upload { bucket: String, key: String, len: usize, content_type: String },
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    pub hub: AuthHub,
    user: Mutex<Option<User>>,
    responses: Mutex<HashMap<String, Result<serde_json::Value, ServiceError>>>,
    upload_error: Mutex<Option<ServiceError>>,
    insert_error: Mutex<Option<ServiceError>>,
    calls: Mutex<Vec<Call>>,
}

pub(crate) fn user(id: &str) -> User {
    User { id: id.to_owned(), email: Some(format!("{id}@example.com")), user_metadata: serde_json::Value::Null }
}

pub(crate) fn session(id: &str) -> Session {
    Session {
        access_token: format!("at-{id}"),
        refresh_token: format!("rt-{id}"),
        token_type: "bearer".to_owned(),
        expires_in: Some(3600),
        expires_at: None,
        user: user(id),
    }
}

impl FakeBackend {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(id: &str) -> Self {
        let backend = Self::default();
        *backend.user.lock().unwrap() = Some(user(id));
        backend
    }

    /// Answer queries against `table` with `value`.
    pub fn respond(&self, table: &str, value: serde_json::Value) {
        self.responses.lock().unwrap().insert(table.to_owned(), Ok(value));
    }

    /// Fail queries against `table` with `err`.
    pub fn fail_query(&self, table: &str, err: ServiceError) {
        self.responses.lock().unwrap().insert(table.to_owned(), Err(err));
    }

    pub fn fail_upload(&self, err: ServiceError) {
        *self.upload_error.lock().unwrap() = Some(err);
    }

    pub fn fail_insert(&self, err: ServiceError) {
        *self.insert_error.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Upload and insert calls only.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Upload { .. } | Call::Insert { .. }))
            .collect()
    }

    pub fn queries(&self) -> Vec<Query> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Query(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AuthEvents for FakeBackend {
    fn subscribe(&self, handler: AuthHandler) -> Result<SubscriptionId, ServiceError> {
        self.hub.subscribe(handler)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.hub.unsubscribe(id);
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn current_user(&self) -> Result<Option<User>, ServiceError> {
        self.record(Call::CurrentUser);
        Ok(self.user.lock().unwrap().clone())
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, ServiceError> {
        self.record(Call::SignIn(email.to_owned()));
        let session = session("u1");
        *self.user.lock().unwrap() = Some(session.user.clone());
        self.hub.emit(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, _password: &str, _username: &str) -> Result<Option<Session>, ServiceError> {
        self.record(Call::SignUp(email.to_owned()));
        Ok(None)
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        self.record(Call::SignOut);
        *self.user.lock().unwrap() = None;
        self.hub.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    async fn query(&self, query: &Query) -> Result<serde_json::Value, ServiceError> {
        self.record(Call::Query(query.clone()));
        self.responses
            .lock()
            .unwrap()
            .get(&query.table)
            .cloned()
            .unwrap_or_else(|| Ok(serde_json::json!([])))
    }

    async fn insert_row(&self, table: &str, record: serde_json::Value) -> Result<(), ServiceError> {
        self.record(Call::Insert { table: table.to_owned(), record });
        self.insert_error.lock().unwrap().clone().map_or(Ok(()), Err)
    }

    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ServiceError> {
        self.record(Call::Upload {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            len: bytes.len(),
            content_type: content_type.to_owned(),
        });
        self.upload_error.lock().unwrap().clone().map_or(Ok(()), Err)
    }

    fn bucket(&self) -> &str {
        "posts"
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("https://cdn.test/{bucket}/{key}")
    }
}
