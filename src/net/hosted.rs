//! HTTP client for the hosted database/auth/storage service.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, session persisted in
//! `localStorage`. Native builds: every request returns
//! [`ServiceError::Unavailable`] so the crate compiles and tests without a
//! browser.
//!
//! SESSION LIFECYCLE
//! =================
//! - `restore_session` runs once at startup and announces `INITIAL_SESSION`.
//! - Requests refresh an expired access token first (`TOKEN_REFRESHED`); a
//!   failed refresh drops the session (`SIGNED_OUT`).
//! - `sign_out` always clears local state, even if the server revoke fails.

#[cfg(test)]
#[path = "hosted_test.rs"]
mod hosted_test;

use async_trait::async_trait;

use super::backend::Backend;
use super::events::{AuthEvents, AuthHandler, AuthHub, SubscriptionId};
use super::query::Query;
use super::session_store::SessionStore;
use super::types::{AuthEvent, Session, User};
use crate::config::BackendConfig;
use crate::error::ServiceError;
use crate::util::clock;

/// `Accept` value asking the rest endpoint for a single object.
pub const SINGLE_OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";

pub struct HostedBackend {
    config: BackendConfig,
    hub: AuthHub,
    store: SessionStore,
}

impl HostedBackend {
    pub fn new(config: BackendConfig) -> Self {
        let store = SessionStore::new(config.session_key.clone());
        Self { config, hub: AuthHub::new(), store }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Current session as last announced to subscribers.
    pub fn session(&self) -> Option<Session> {
        self.hub.session()
    }

    /// Token for `Authorization: Bearer`: the access token when signed in,
    /// otherwise the anon key.
    pub fn bearer_token(&self) -> String {
        self.hub
            .session()
            .map_or_else(|| self.config.anon_key.clone(), |s| s.access_token)
    }

    pub fn rest_url(&self, query: &Query) -> String {
        format!("{}?{}", self.table_url(&query.table), query.to_query_string())
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, urlencoding::encode(table))
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.url)
    }

    pub fn object_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.url,
            urlencoding::encode(bucket),
            urlencoding::encode(key)
        )
    }

    /// Load the persisted session, refresh it if stale, and announce the
    /// outcome as `INITIAL_SESSION`.
    pub async fn restore_session(&self) {
        let session = match self.store.load() {
            Some(session) if session.is_expired(clock::now_secs()) => {
                let body = serde_json::json!({ "refresh_token": session.refresh_token });
                match self.request_token("refresh_token", body).await {
                    Ok(fresh) => {
                        log::info!("auth: restored session refreshed for {}", fresh.user.id);
                        Some(fresh)
                    }
                    Err(e) => {
                        log::warn!("auth: stored session could not be refreshed: {e}");
                        None
                    }
                }
            }
            other => other,
        };
        match &session {
            Some(s) => self.store.save(s),
            None => self.store.clear(),
        }
        self.hub.determine(session);
    }

    /// Make sure the bearer token is usable, refreshing it when expired.
    async fn ensure_fresh(&self) {
        let Some(session) = self.hub.session() else {
            return;
        };
        if !session.is_expired(clock::now_secs()) {
            return;
        }
        let body = serde_json::json!({ "refresh_token": session.refresh_token });
        match self.request_token("refresh_token", body).await {
            Ok(fresh) => self.accept_session(AuthEvent::TokenRefreshed, fresh),
            Err(e) => {
                log::warn!("auth: token refresh failed, dropping session: {e}");
                self.clear_session();
            }
        }
    }

    fn accept_session(&self, event: AuthEvent, session: Session) {
        self.store.save(&session);
        self.hub.emit(event, Some(session));
    }

    fn clear_session(&self) {
        self.store.clear();
        self.hub.emit(AuthEvent::SignedOut, None);
    }

    #[cfg(feature = "csr")]
    fn authorize(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {}", self.bearer_token()))
    }

    /// Exchange credentials or a refresh token for a session.
    async fn request_token(&self, grant_type: &str, body: serde_json::Value) -> Result<Session, ServiceError> {
        #[cfg(feature = "csr")]
        {
            let url = self.auth_url(&format!("token?grant_type={grant_type}"));
            let request = gloo_net::http::Request::post(&url)
                .header("apikey", &self.config.anon_key)
                .json(&body)
                .map_err(|e| ServiceError::Request(e.to_string()))?;
            let resp = send(request).await?;
            let session: Session = resp.json().await.map_err(|e| ServiceError::Decode(e.to_string()))?;
            Ok(session.anchored(clock::now_secs()))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (grant_type, body);
            Err(ServiceError::Unavailable)
        }
    }

    /// Revoke `access_token` on the server.
    async fn revoke(&self, access_token: &str) -> Result<(), ServiceError> {
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::post(&self.auth_url("logout"))
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {access_token}"))
                .build()
                .map_err(|e| ServiceError::Request(e.to_string()))?;
            send(request).await.map(|_| ())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = access_token;
            Err(ServiceError::Unavailable)
        }
    }
}

/// Send a request and turn non-2xx responses into [`ServiceError::Status`].
#[cfg(feature = "csr")]
async fn send(request: gloo_net::http::Request) -> Result<gloo_net::http::Response, ServiceError> {
    let resp = request
        .send()
        .await
        .map_err(|e| ServiceError::Request(e.to_string()))?;
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    log::warn!("backend: request failed with status {status}");
    Err(ServiceError::from_status(status, &body))
}

/// Whether a failed revoke still counts as signed out.
fn revoke_failure_is_benign(err: &ServiceError) -> bool {
    matches!(err.status(), Some(401 | 403 | 404))
}

/// Decode a sign-up response, which only carries a session when the account
/// is usable immediately.
#[cfg(any(test, feature = "csr"))]
fn signup_session(body: serde_json::Value, now_secs: i64) -> Result<Option<Session>, ServiceError> {
    if body.get("access_token").is_none() {
        return Ok(None);
    }
    let session: Session = serde_json::from_value(body).map_err(|e| ServiceError::Decode(e.to_string()))?;
    Ok(Some(session.anchored(now_secs)))
}

impl AuthEvents for HostedBackend {
    fn subscribe(&self, handler: AuthHandler) -> Result<SubscriptionId, ServiceError> {
        self.hub.subscribe(handler)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.hub.unsubscribe(id);
    }
}

#[async_trait(?Send)]
impl Backend for HostedBackend {
    async fn current_user(&self) -> Result<Option<User>, ServiceError> {
        self.ensure_fresh().await;
        if self.hub.session().is_none() {
            return Ok(None);
        }
        #[cfg(feature = "csr")]
        {
            let request = self
                .authorize(gloo_net::http::Request::get(&self.auth_url("user")))
                .build()
                .map_err(|e| ServiceError::Request(e.to_string()))?;
            match send(request).await {
                Ok(resp) => resp.json::<User>().await.map(Some).map_err(|e| ServiceError::Decode(e.to_string())),
                Err(e) if e.status() == Some(401) => Ok(None),
                Err(e) => Err(e),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ServiceError::Unavailable)
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ServiceError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let session = self.request_token("password", body).await?;
        log::info!("auth: signed in as {}", session.user.id);
        self.accept_session(AuthEvent::SignedIn, session.clone());
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str, username: &str) -> Result<Option<Session>, ServiceError> {
        #[cfg(feature = "csr")]
        {
            let payload = serde_json::json!({
                "email": email,
                "password": password,
                "data": { "username": username },
            });
            let request = gloo_net::http::Request::post(&self.auth_url("signup"))
                .header("apikey", &self.config.anon_key)
                .json(&payload)
                .map_err(|e| ServiceError::Request(e.to_string()))?;
            let body: serde_json::Value = send(request)
                .await?
                .json()
                .await
                .map_err(|e| ServiceError::Decode(e.to_string()))?;
            let session = signup_session(body, clock::now_secs())?;
            if let Some(session) = &session {
                self.accept_session(AuthEvent::SignedIn, session.clone());
            }
            Ok(session)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password, username);
            Err(ServiceError::Unavailable)
        }
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        let revoked = match self.hub.session() {
            Some(session) => self.revoke(&session.access_token).await,
            None => Ok(()),
        };
        self.clear_session();
        match revoked {
            Err(e) if !revoke_failure_is_benign(&e) => Err(e),
            _ => Ok(()),
        }
    }

    async fn query(&self, query: &Query) -> Result<serde_json::Value, ServiceError> {
        self.ensure_fresh().await;
        #[cfg(feature = "csr")]
        {
            let mut builder = self.authorize(gloo_net::http::Request::get(&self.rest_url(query)));
            if query.single {
                builder = builder.header("Accept", SINGLE_OBJECT_MEDIA_TYPE);
            }
            let request = builder.build().map_err(|e| ServiceError::Request(e.to_string()))?;
            send(request)
                .await?
                .json::<serde_json::Value>()
                .await
                .map_err(|e| ServiceError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = query;
            Err(ServiceError::Unavailable)
        }
    }

    async fn insert_row(&self, table: &str, record: serde_json::Value) -> Result<(), ServiceError> {
        self.ensure_fresh().await;
        #[cfg(feature = "csr")]
        {
            let request = self
                .authorize(gloo_net::http::Request::post(&self.table_url(table)))
                .header("Prefer", "return=minimal")
                .json(&record)
                .map_err(|e| ServiceError::Request(e.to_string()))?;
            send(request).await.map(|_| ())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (table, record);
            Err(ServiceError::Unavailable)
        }
    }

    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ServiceError> {
        self.ensure_fresh().await;
        #[cfg(feature = "csr")]
        {
            let body = js_sys::Uint8Array::from(bytes.as_slice());
            let request = self
                .authorize(gloo_net::http::Request::post(&self.object_url(bucket, key)))
                .header("Content-Type", content_type)
                .header("x-upsert", "false")
                .body(body)
                .map_err(|e| ServiceError::Request(e.to_string()))?;
            send(request).await.map(|_| ())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (bucket, key, bytes, content_type);
            Err(ServiceError::Unavailable)
        }
    }

    fn bucket(&self) -> &str {
        &self.config.bucket
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url,
            urlencoding::encode(bucket),
            urlencoding::encode(key)
        )
    }
}
