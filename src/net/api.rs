//! Typed requests issued by the views.
//!
//! Each helper is one view's read or write against `dyn Backend`: build the
//! query, run it, decode the rows. No caching, retry, or pagination.
//!
//! ERROR HANDLING
//! ==============
//! Everything returns [`AppError`] so views can turn any failure into a
//! notice the same way.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::backend::Backend;
use super::query::Query;
use super::types::{FeedPost, LikeActivity, NewLike, NewPost, Post, Profile, User};
use crate::error::{AppError, ServiceError};
use crate::state::compose::{PostDraft, object_key};

pub const POSTS_TABLE: &str = "posts";
pub const PROFILES_TABLE: &str = "profiles";
pub const LIKES_TABLE: &str = "likes";

/// The signed-in user, or [`AppError::Unauthenticated`].
///
/// # Errors
///
/// Fails when there is no session or the user lookup fails.
pub async fn require_user(backend: &dyn Backend) -> Result<User, AppError> {
    backend.current_user().await?.ok_or(AppError::Unauthenticated)
}

fn decode_rows<T: DeserializeOwned>(value: serde_json::Value) -> Result<Vec<T>, AppError> {
    serde_json::from_value(value).map_err(|e| ServiceError::Decode(e.to_string()).into())
}

fn decode_one<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| ServiceError::Decode(e.to_string()).into())
}

fn feed_query() -> Query {
    Query::from(POSTS_TABLE)
        .select("*,profiles(username)")
        .order_desc("created_at")
}

fn search_query(term: &str) -> Query {
    Query::from(POSTS_TABLE)
        .contains("caption", term)
        .order_desc("created_at")
}

fn profile_query(user_id: &str) -> Query {
    Query::from(PROFILES_TABLE).eq("id", user_id).single()
}

fn user_posts_query(user_id: &str) -> Query {
    Query::from(POSTS_TABLE)
        .eq("user_id", user_id)
        .order_desc("created_at")
}

fn activity_query(user_id: &str) -> Query {
    Query::from(LIKES_TABLE)
        .select("*,posts(*)")
        .eq("user_id", user_id)
        .order_desc("created_at")
}

/// Home feed: every post, newest first, with its author's username.
///
/// # Errors
///
/// Propagates backend and decode failures.
pub async fn fetch_feed(backend: &dyn Backend) -> Result<Vec<FeedPost>, AppError> {
    decode_rows(backend.query(&feed_query()).await?)
}

/// Posts whose caption contains `term` (case-insensitive), newest first.
/// A blank term matches nothing and issues no request.
///
/// # Errors
///
/// Propagates backend and decode failures.
pub async fn search_posts(backend: &dyn Backend, term: &str) -> Result<Vec<Post>, AppError> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(Vec::new());
    }
    decode_rows(backend.query(&search_query(term)).await?)
}

/// The signed-in user's profile row.
///
/// # Errors
///
/// [`AppError::Unauthenticated`] without a session; otherwise backend and
/// decode failures.
pub async fn fetch_profile(backend: &dyn Backend) -> Result<Profile, AppError> {
    let user = require_user(backend).await?;
    decode_one(backend.query(&profile_query(&user.id)).await?)
}

/// The signed-in user's own posts, newest first.
///
/// # Errors
///
/// [`AppError::Unauthenticated`] without a session; otherwise backend and
/// decode failures.
pub async fn fetch_user_posts(backend: &dyn Backend) -> Result<Vec<Post>, AppError> {
    let user = require_user(backend).await?;
    decode_rows(backend.query(&user_posts_query(&user.id)).await?)
}

/// Profile row and own posts, requested concurrently and settled
/// independently: a missing profile row does not hide the posts.
pub async fn fetch_profile_page(
    backend: &dyn Backend,
) -> (Result<Profile, AppError>, Result<Vec<Post>, AppError>) {
    futures::join!(fetch_profile(backend), fetch_user_posts(backend))
}

/// Posts the signed-in user liked, newest like first.
///
/// # Errors
///
/// [`AppError::Unauthenticated`] without a session; otherwise backend and
/// decode failures.
pub async fn fetch_activity(backend: &dyn Backend) -> Result<Vec<LikeActivity>, AppError> {
    let user = require_user(backend).await?;
    decode_rows(backend.query(&activity_query(&user.id)).await?)
}

/// Publish a post: upload the image, then insert a row pointing at its public URL.
///
/// Validation runs before any request, so an incomplete draft never reaches
/// the backend. A failed insert leaves the uploaded object behind.
///
/// # Errors
///
/// [`AppError::Validation`] for an incomplete draft,
/// [`AppError::Unauthenticated`] without a session, otherwise the failing
/// upload or insert.
pub async fn create_post(backend: &dyn Backend, draft: &PostDraft) -> Result<(), AppError> {
    let ready = draft.validate()?;
    let user = require_user(backend).await?;

    let bucket = backend.bucket().to_owned();
    let key = object_key(&ready.image.name);
    backend
        .upload_object(&bucket, &key, ready.image.bytes.clone(), &ready.image.content_type)
        .await?;
    let image_url = backend.public_url(&bucket, &key);

    let record = NewPost {
        user_id: user.id,
        caption: ready.caption.to_owned(),
        category: ready.category.to_owned(),
        image_url,
    };
    let record = serde_json::to_value(&record).map_err(|e| ServiceError::Decode(e.to_string()))?;
    backend.insert_row(POSTS_TABLE, record).await?;
    log::info!("post created with image {key}");
    Ok(())
}

/// Record a like of `post_id` by the signed-in user.
///
/// # Errors
///
/// [`AppError::Unauthenticated`] without a session, otherwise the insert failure.
pub async fn like_post(backend: &dyn Backend, post_id: &str) -> Result<(), AppError> {
    let user = require_user(backend).await?;
    let record = NewLike { user_id: user.id, post_id: post_id.to_owned() };
    let record = serde_json::to_value(&record).map_err(|e| ServiceError::Decode(e.to_string()))?;
    backend.insert_row(LIKES_TABLE, record).await?;
    Ok(())
}

/// End the session.
///
/// # Errors
///
/// Propagates the backend's sign-out failure.
pub async fn sign_out(backend: &dyn Backend) -> Result<(), AppError> {
    backend.sign_out().await?;
    Ok(())
}
