use super::*;
use crate::error::ServiceError;
use crate::state::compose::MISSING_IMAGE_MESSAGE;

// =============================================================
// push / dismiss
// =============================================================

#[test]
fn push_assigns_increasing_ids() {
    let mut state = NoticeState::default();
    let a = state.success("Success!", "Your post has been created.");
    let b = state.success("Liked", "");
    assert!(b > a);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[0].kind, NoticeKind::Success);
}

#[test]
fn dismiss_removes_only_matching_notice() {
    let mut state = NoticeState::default();
    let a = state.success("a", "");
    let b = state.success("b", "");
    assert!(state.dismiss(a));
    assert!(!state.dismiss(a));
    assert_eq!(state.items.iter().map(|n| n.id).collect::<Vec<_>>(), vec![b]);
}

#[test]
fn queue_keeps_most_recent_notices() {
    let mut state = NoticeState::default();
    for i in 0..(MAX_VISIBLE + 2) {
        state.success(format!("n{i}"), "");
    }
    assert_eq!(state.items.len(), MAX_VISIBLE);
    assert_eq!(state.items.last().unwrap().title, format!("n{}", MAX_VISIBLE + 1));
}

// =============================================================
// Error notices
// =============================================================

#[test]
fn validation_error_becomes_error_notice() {
    let mut state = NoticeState::default();
    state.error(&AppError::validation(MISSING_IMAGE_MESSAGE));
    let notice = &state.items[0];
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.title, ERROR_TITLE);
    assert_eq!(notice.description, "Please select an image");
}

#[test]
fn service_error_notice_carries_backend_message() {
    let mut state = NoticeState::default();
    let err = AppError::from(ServiceError::from_status(400, r#"{"message":"Invalid login credentials"}"#));
    state.error(&err);
    assert_eq!(state.items[0].description, "Invalid login credentials");
}
