//! Primary navigation: bottom bar on narrow screens, sidebar on wide ones.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

pub const APP_TITLE: &str = "Nexus.comm";

/// `(label, icon, path)` for every destination, in display order.
pub const NAV_ITEMS: [(&str, &str, &str); 5] = [
    ("Home", "⌂", "/"),
    ("Search", "⌕", "/search"),
    ("Create", "＋", "/create"),
    ("Activity", "♡", "/activity"),
    ("Profile", "☺", "/profile"),
];

/// Whether the link to `path` is the current route. Exact match only, so
/// `/` is not active on `/search`.
pub fn is_active(current: &str, path: &str) -> bool {
    let current = if current.len() > 1 { current.trim_end_matches('/') } else { current };
    current == path
}

#[component]
pub fn Navigation() -> impl IntoView {
    let pathname = use_location().pathname;
    let links = move |item_class: &'static str| {
        NAV_ITEMS
            .iter()
            .map(|&(label, icon, path)| {
                let active = move || is_active(&pathname.get(), path);
                view! {
                    <a href=path class=item_class class:nav__item--active=active>
                        <span class="nav__icon" aria-hidden="true">{icon}</span>
                        <span class="nav__label">{label}</span>
                    </a>
                }
            })
            .collect_view()
    };

    view! {
        <nav class="nav nav--mobile">{links("nav__item")}</nav>
        <nav class="nav nav--desktop">
            <h1 class="nav__title">{APP_TITLE}</h1>
            {links("nav__item nav__item--wide")}
        </nav>
    }
}
