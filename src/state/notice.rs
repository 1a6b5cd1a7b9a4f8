//! Transient notification queue rendered by the `Toaster`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided once as `RwSignal<NoticeState>` by the root component. Views
//! push a success notice after a completed write and an error notice for
//! every failed request; the toaster renders the queue and schedules each
//! notice's auto-dismissal.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use crate::error::AppError;

/// Time a notice stays visible without user action.
pub const AUTO_DISMISS_MS: u32 = 5_000;

/// Oldest notices are dropped beyond this many.
pub const MAX_VISIBLE: usize = 3;

pub const ERROR_TITLE: &str = "Error";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    next_id: u64,
    pub items: Vec<Notice>,
}

impl NoticeState {
    /// Queue a notice and return its id.
    pub fn push(&mut self, kind: NoticeKind, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice { id, kind, title: title.into(), description: description.into() });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn success(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.push(NoticeKind::Success, title, description)
    }

    /// Queue the standard error notice for `err`.
    pub fn error(&mut self, err: &AppError) -> u64 {
        log::warn!("notice: {err}");
        self.push(NoticeKind::Error, ERROR_TITLE, err.to_string())
    }

    /// Remove notice `id`. Returns whether it was still queued.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }
}
