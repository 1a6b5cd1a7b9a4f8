//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome (navigation, notices, loading states) and
//! the session gate, reading shared state from Leptos context providers.

pub mod navigation;
pub mod post_grid;
pub mod session_guard;
pub mod spinner;
pub mod toaster;
