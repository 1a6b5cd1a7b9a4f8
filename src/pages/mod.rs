//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its requests and result state and delegates shared chrome
//! to `components`. Every page except `auth` is mounted inside the session
//! guard.

pub mod activity;
pub mod auth;
pub mod create;
pub mod feed;
pub mod profile;
pub mod search;
