//! Wire DTOs for the hosted auth, rest, and storage endpoints.
//!
//! DESIGN
//! ======
//! Ids are kept as strings (UUIDs on the wire) and timestamps as the ISO 8601
//! text the backend returns; views only display them, never do arithmetic.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An authenticated user as returned by the auth endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Sign-in email, when the account has one.
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form metadata supplied at sign-up (e.g. `username`).
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

/// An active session issued by the auth service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds at issue time.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Absolute expiry in seconds since the Unix epoch.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// Seconds before the real expiry at which a session is treated as expired.
pub const EXPIRY_SKEW_SECS: i64 = 60;

impl Session {
    /// Fill `expires_at` from `expires_in` when the backend omitted it.
    #[must_use]
    pub fn anchored(mut self, now_secs: i64) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self.expires_in.map(|ttl| now_secs + ttl);
        }
        self
    }

    /// Whether the access token should be refreshed before use.
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|at| at - EXPIRY_SKEW_SECS <= now_secs)
    }
}

/// Kind of auth-state transition pushed to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl AuthEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialSession => "INITIAL_SESSION",
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::UserUpdated => "USER_UPDATED",
        }
    }
}

/// One auth-state notification: the event kind and the session after it.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

impl AuthChange {
    pub fn new(event: AuthEvent, session: Option<Session>) -> Self {
        Self { event, session }
    }
}

/// A row of the `posts` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub image_url: String,
    pub created_at: String,
}

impl Post {
    /// Alt text for the post image.
    pub fn alt_text(&self) -> &str {
        self.caption
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("Post")
    }
}

/// Author columns embedded into a feed row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    #[serde(default)]
    pub username: Option<String>,
}

/// A post joined with its author's profile for the home feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: Post,
    #[serde(default, rename = "profiles")]
    pub author: Option<AuthorRef>,
}

impl FeedPost {
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|a| a.username.as_deref())
            .unwrap_or("unknown")
    }
}

/// A row of the `profiles` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// A row of the `likes` table joined with the liked post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LikeActivity {
    pub id: String,
    pub user_id: String,
    pub post_id: String,
    pub created_at: String,
    #[serde(default, rename = "posts")]
    pub post: Option<Post>,
}

/// Insert payload for `posts`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewPost {
    pub user_id: String,
    pub caption: String,
    pub category: String,
    pub image_url: String,
}

/// Insert payload for `likes`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewLike {
    pub user_id: String,
    pub post_id: String,
}
