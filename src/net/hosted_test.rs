use std::sync::{Arc, Mutex};

use futures::executor::block_on;

use super::*;
use crate::net::types::AuthChange;

fn backend() -> HostedBackend {
    HostedBackend::new(BackendConfig {
        url: "https://proj.example.co".into(),
        anon_key: "anon-key".into(),
        bucket: "posts".into(),
        session_key: "test.session".into(),
    })
}

fn session(expires_at: Option<i64>) -> Session {
    Session {
        access_token: "access".into(),
        refresh_token: "refresh".into(),
        token_type: "bearer".into(),
        expires_in: None,
        expires_at,
        user: User { id: "u1".into(), email: Some("a@b.com".into()), user_metadata: serde_json::Value::Null },
    }
}

fn record_events(backend: &HostedBackend) -> Arc<Mutex<Vec<AuthEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    backend
        .subscribe(Arc::new(move |change: &AuthChange| sink.lock().unwrap().push(change.event)))
        .unwrap();
    log
}

// =============================================================
// URLs
// =============================================================

#[test]
fn rest_url_combines_table_and_query() {
    let q = Query::from("posts").eq("user_id", "u1").order_desc("created_at");
    assert_eq!(
        backend().rest_url(&q),
        "https://proj.example.co/rest/v1/posts?select=%2A&user_id=eq.u1&order=created_at.desc"
    );
}

#[test]
fn auth_url_appends_path() {
    assert_eq!(
        backend().auth_url("token?grant_type=password"),
        "https://proj.example.co/auth/v1/token?grant_type=password"
    );
}

#[test]
fn object_and_public_urls_encode_key() {
    let b = backend();
    assert_eq!(b.object_url("posts", "a b.png"), "https://proj.example.co/storage/v1/object/posts/a%20b.png");
    assert_eq!(b.public_url("posts", "k.jpg"), "https://proj.example.co/storage/v1/object/public/posts/k.jpg");
}

// =============================================================
// Session handling
// =============================================================

#[test]
fn bearer_token_falls_back_to_anon_key() {
    let b = backend();
    assert_eq!(b.bearer_token(), "anon-key");
    b.hub.emit(AuthEvent::SignedIn, Some(session(None)));
    assert_eq!(b.bearer_token(), "access");
}

#[test]
fn restore_without_stored_session_announces_signed_out_state() {
    let b = backend();
    let events = record_events(&b);
    block_on(b.restore_session());
    assert_eq!(*events.lock().unwrap(), vec![AuthEvent::InitialSession]);
    assert!(b.session().is_none());
}

#[test]
fn current_user_without_session_is_none() {
    let b = backend();
    assert_eq!(block_on(b.current_user()), Ok(None));
}

#[test]
fn expired_session_that_cannot_refresh_is_dropped() {
    let b = backend();
    b.hub.emit(AuthEvent::SignedIn, Some(session(Some(0))));
    let events = record_events(&b);
    let user = block_on(b.current_user());
    assert_eq!(user, Ok(None));
    assert!(b.session().is_none());
    assert_eq!(*events.lock().unwrap(), vec![AuthEvent::InitialSession, AuthEvent::SignedOut]);
}

#[test]
fn sign_out_clears_locally_even_when_revoke_fails() {
    let b = backend();
    b.hub.emit(AuthEvent::SignedIn, Some(session(None)));
    let events = record_events(&b);
    let result = block_on(b.sign_out());
    assert_eq!(result, Err(ServiceError::Unavailable));
    assert!(b.session().is_none());
    assert_eq!(events.lock().unwrap().last(), Some(&AuthEvent::SignedOut));
}

#[test]
fn sign_out_without_session_still_announces() {
    let b = backend();
    let events = record_events(&b);
    assert_eq!(block_on(b.sign_out()), Ok(()));
    assert_eq!(*events.lock().unwrap(), vec![AuthEvent::SignedOut]);
}

#[test]
fn sign_in_outside_browser_is_unavailable_and_emits_nothing() {
    let b = backend();
    let events = record_events(&b);
    assert_eq!(block_on(b.sign_in("a@b.com", "secret")), Err(ServiceError::Unavailable));
    assert!(events.lock().unwrap().is_empty());
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn revoke_failure_is_benign_for_missing_or_expired_tokens() {
    assert!(revoke_failure_is_benign(&ServiceError::Status { status: 401, message: String::new() }));
    assert!(revoke_failure_is_benign(&ServiceError::Status { status: 404, message: String::new() }));
    assert!(!revoke_failure_is_benign(&ServiceError::Status { status: 500, message: String::new() }));
    assert!(!revoke_failure_is_benign(&ServiceError::Request("offline".into())));
}

#[test]
fn signup_session_without_token_is_none() {
    let body = serde_json::json!({ "id": "u1", "email": "a@b.com", "confirmation_sent_at": "2024-01-01T00:00:00Z" });
    assert_eq!(signup_session(body, 0), Ok(None));
}

#[test]
fn signup_session_with_token_is_anchored() {
    let body = serde_json::json!({
        "access_token": "at",
        "refresh_token": "rt",
        "expires_in": 3600,
        "user": { "id": "u1" }
    });
    let session = signup_session(body, 100).unwrap().unwrap();
    assert_eq!(session.expires_at, Some(3_700));
}

#[test]
fn signup_session_with_malformed_token_body_is_decode_error() {
    let body = serde_json::json!({ "access_token": "at" });
    assert!(matches!(signup_session(body, 0), Err(ServiceError::Decode(_))));
}
