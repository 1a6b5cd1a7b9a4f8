//! Per-view result state.
//!
//! DESIGN
//! ======
//! Each list view is in exactly one of three states, so "loading and
//! populated at once" cannot be expressed. A failed request settles to
//! `Empty` and hands its error back for the notice queue, so a view never
//! stays stuck in `Loading`.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::error::AppError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewState<T> {
    #[default]
    Loading,
    Empty,
    Ready(Vec<T>),
}

impl<T> ViewState<T> {
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() { Self::Empty } else { Self::Ready(rows) }
    }

    /// Settle a finished request. Errors leave the view `Empty` and are returned.
    pub fn settle(result: Result<Vec<T>, AppError>) -> (Self, Option<AppError>) {
        match result {
            Ok(rows) => (Self::from_rows(rows), None),
            Err(e) => (Self::Empty, Some(e)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Self::Ready(rows) => rows,
            Self::Loading | Self::Empty => &[],
        }
    }
}
