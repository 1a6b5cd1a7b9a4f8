use futures::executor::block_on;

use super::*;
use crate::net::fake::{Call, FakeBackend};
use crate::net::query::{Direction, Filter};
use crate::state::compose::{MISSING_IMAGE_MESSAGE, SelectedImage};

fn post_row(id: &str, caption: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "user_id": "u1",
        "caption": caption,
        "category": "Nature",
        "image_url": format!("https://cdn.test/posts/{id}.jpg"),
        "created_at": "2024-01-05T12:00:00+00:00"
    })
}

fn draft_with_image() -> PostDraft {
    PostDraft {
        caption: "Golden hour".into(),
        category: "Travel".into(),
        image: Some(SelectedImage::new("beach.jpeg".into(), "image/jpeg".into(), vec![0; 16])),
    }
}

// =============================================================
// Queries
// =============================================================

#[test]
fn feed_query_embeds_author_and_orders_newest_first() {
    let q = feed_query();
    assert_eq!(q.table, "posts");
    assert_eq!(q.select, "*,profiles(username)");
    let order = q.order.unwrap();
    assert_eq!(order.column, "created_at");
    assert_eq!(order.direction, Direction::Desc);
}

#[test]
fn activity_query_joins_liked_posts_for_user() {
    let q = activity_query("u9");
    assert_eq!(q.table, "likes");
    assert_eq!(q.select, "*,posts(*)");
    assert_eq!(q.filters, vec![Filter::Eq { column: "user_id".into(), value: "u9".into() }]);
}

#[test]
fn profile_query_is_single_row_by_id() {
    let q = profile_query("u9");
    assert!(q.single);
    assert_eq!(q.filters, vec![Filter::Eq { column: "id".into(), value: "u9".into() }]);
}

// =============================================================
// Reads
// =============================================================

#[test]
fn fetch_feed_decodes_rows() {
    let backend = FakeBackend::signed_in("u1");
    backend.respond("posts", serde_json::json!([post_row("p2", "b"), post_row("p1", "a")]));
    let rows = block_on(fetch_feed(&backend)).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].post.id, "p2");
}

#[test]
fn fetch_feed_surfaces_service_error() {
    let backend = FakeBackend::signed_in("u1");
    let err = ServiceError::Status { status: 500, message: "boom".into() };
    backend.fail_query("posts", err.clone());
    assert_eq!(block_on(fetch_feed(&backend)), Err(AppError::Service(err)));
}

#[test]
fn fetch_feed_reports_decode_error_for_bad_rows() {
    let backend = FakeBackend::signed_in("u1");
    backend.respond("posts", serde_json::json!([{ "id": "p1" }]));
    let err = block_on(fetch_feed(&backend)).unwrap_err();
    assert!(matches!(err, AppError::Service(ServiceError::Decode(_))));
}

#[test]
fn search_blank_term_issues_no_request() {
    let backend = FakeBackend::signed_in("u1");
    assert_eq!(block_on(search_posts(&backend, "   ")), Ok(Vec::new()));
    assert!(backend.calls().is_empty());
}

#[test]
fn search_trims_term_and_matches_caption() {
    let backend = FakeBackend::signed_in("u1");
    backend.respond("posts", serde_json::json!([post_row("p1", "sunset")]));
    let rows = block_on(search_posts(&backend, "  sun ")).unwrap();
    assert_eq!(rows.len(), 1);
    let q = &backend.queries()[0];
    assert_eq!(q.filters, vec![Filter::Contains { column: "caption".into(), term: "sun".into() }]);
}

#[test]
fn fetch_user_posts_filters_by_signed_in_user() {
    let backend = FakeBackend::signed_in("u7");
    block_on(fetch_user_posts(&backend)).unwrap();
    let q = &backend.queries()[0];
    assert_eq!(q.filters, vec![Filter::Eq { column: "user_id".into(), value: "u7".into() }]);
}

#[test]
fn fetch_activity_without_session_is_unauthenticated() {
    let backend = FakeBackend::signed_out();
    assert_eq!(block_on(fetch_activity(&backend)), Err(AppError::Unauthenticated));
    assert!(backend.queries().is_empty());
}

#[test]
fn fetch_profile_page_returns_profile_and_posts() {
    let backend = FakeBackend::signed_in("u1");
    backend.respond("profiles", serde_json::json!({ "id": "u1", "username": "sarah" }));
    backend.respond("posts", serde_json::json!([post_row("p1", "a")]));
    let (profile, posts) = block_on(fetch_profile_page(&backend));
    assert_eq!(profile.unwrap().username.as_deref(), Some("sarah"));
    assert_eq!(posts.unwrap().len(), 1);
}

#[test]
fn fetch_profile_page_keeps_posts_when_profile_row_missing() {
    let backend = FakeBackend::signed_in("u1");
    let missing = ServiceError::Status { status: 406, message: "no rows".into() };
    backend.fail_query("profiles", missing.clone());
    backend.respond("posts", serde_json::json!([post_row("p1", "a")]));
    let (profile, posts) = block_on(fetch_profile_page(&backend));
    assert_eq!(profile, Err(AppError::Service(missing)));
    let posts = posts.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "p1");
}

#[test]
fn fetch_profile_page_keeps_profile_when_posts_fail() {
    let backend = FakeBackend::signed_in("u1");
    backend.respond("profiles", serde_json::json!({ "id": "u1", "username": "sarah" }));
    backend.fail_query("posts", ServiceError::Request("offline".into()));
    let (profile, posts) = block_on(fetch_profile_page(&backend));
    assert!(profile.is_ok());
    assert_eq!(posts, Err(AppError::Service(ServiceError::Request("offline".into()))));
}

// =============================================================
// create_post
// =============================================================

#[test]
fn create_post_without_image_makes_no_backend_calls() {
    let backend = FakeBackend::signed_in("u1");
    let err = block_on(create_post(&backend, &PostDraft::default())).unwrap_err();
    assert_eq!(err, AppError::Validation(MISSING_IMAGE_MESSAGE.into()));
    assert!(backend.calls().is_empty());
}

#[test]
fn create_post_uploads_then_inserts_referencing_row() {
    let backend = FakeBackend::signed_in("u1");
    block_on(create_post(&backend, &draft_with_image())).unwrap();

    let writes = backend.writes();
    assert_eq!(writes.len(), 2);
    let Call::Upload { bucket, key, len, content_type } = &writes[0] else {
        panic!("expected upload first, got {:?}", writes[0]);
    };
    assert_eq!(bucket, "posts");
    assert!(key.ends_with(".jpeg"));
    assert_eq!(*len, 16);
    assert_eq!(content_type, "image/jpeg");

    let Call::Insert { table, record } = &writes[1] else {
        panic!("expected insert second, got {:?}", writes[1]);
    };
    assert_eq!(table, "posts");
    assert_eq!(record["user_id"], "u1");
    assert_eq!(record["caption"], "Golden hour");
    assert_eq!(record["category"], "Travel");
    assert_eq!(record["image_url"], format!("https://cdn.test/posts/{key}"));
}

#[test]
fn create_post_signed_out_is_unauthenticated_without_writes() {
    let backend = FakeBackend::signed_out();
    let err = block_on(create_post(&backend, &draft_with_image())).unwrap_err();
    assert_eq!(err, AppError::Unauthenticated);
    assert!(backend.writes().is_empty());
}

#[test]
fn create_post_upload_failure_skips_insert() {
    let backend = FakeBackend::signed_in("u1");
    backend.fail_upload(ServiceError::Status { status: 413, message: "Payload too large".into() });
    let err = block_on(create_post(&backend, &draft_with_image())).unwrap_err();
    assert_eq!(err.to_string(), "Payload too large");
    assert_eq!(backend.writes().len(), 1);
}

#[test]
fn create_post_insert_failure_is_reported() {
    let backend = FakeBackend::signed_in("u1");
    backend.fail_insert(ServiceError::Request("offline".into()));
    let err = block_on(create_post(&backend, &draft_with_image())).unwrap_err();
    assert_eq!(err, AppError::Service(ServiceError::Request("offline".into())));
}

// =============================================================
// like_post / sign_out
// =============================================================

#[test]
fn like_post_inserts_user_post_pair() {
    let backend = FakeBackend::signed_in("u1");
    block_on(like_post(&backend, "p3")).unwrap();
    assert_eq!(
        backend.writes(),
        vec![Call::Insert {
            table: "likes".into(),
            record: serde_json::json!({ "user_id": "u1", "post_id": "p3" }),
        }]
    );
}

#[test]
fn sign_out_delegates_to_backend() {
    let backend = FakeBackend::signed_in("u1");
    block_on(sign_out(&backend)).unwrap();
    assert_eq!(backend.calls(), vec![Call::SignOut]);
}
