//! Networking modules for the hosted backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `backend` defines the contract the views depend on, `hosted` implements it
//! over HTTP, `session_store` persists its session, `events` carries
//! auth-state notifications, `query` describes row reads, `api` holds the
//! typed per-view requests, and `types` defines the wire schema.

pub mod api;
pub mod backend;
pub mod events;
#[cfg(test)]
pub(crate) mod fake;
pub mod hosted;
pub mod query;
pub mod session_store;
pub mod types;
