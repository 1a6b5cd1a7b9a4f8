//! # nexus
//!
//! Leptos + WASM client for the Nexus.comm photo-sharing app.
//!
//! All persistence, auth, and file storage live in a hosted backend reached
//! over HTTP from the browser. This crate holds the session guard, the
//! per-view requests against that backend, and the pages that render them.
//! Browser-only code sits behind the `csr` feature; without it every backend
//! call returns `ServiceError::Unavailable`, which keeps the state and
//! request logic testable natively.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
