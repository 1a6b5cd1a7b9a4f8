//! Client state that lives outside any single component.
//!
//! DESIGN
//! ======
//! Plain structs and enums with no Leptos types, so every transition is unit
//! tested natively. Components wrap them in `RwSignal`s.

pub mod compose;
pub mod guard;
pub mod notice;
pub mod view;
