//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Builds the hosted backend from build-time configuration, starts session
//! restore, and provides two contexts to every route: the `SharedBackend`
//! and the `RwSignal<NoticeState>` notice queue. A configuration failure
//! replaces the router with an error screen.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::session_guard::SessionGuard;
use crate::components::toaster::Toaster;
use crate::config::BackendConfig;
use crate::net::backend::SharedBackend;
use crate::net::hosted::HostedBackend;
use crate::pages::{
    activity::ActivityPage, auth::AuthPage, create::CreatePage, feed::FeedPage, profile::ProfilePage,
    search::SearchPage,
};
use crate::state::notice::NoticeState;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let notices = RwSignal::new(NoticeState::default());
    provide_context(notices);

    let config = match BackendConfig::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("config: {e}");
            return view! { <ConfigErrorScreen message=e.to_string()/> }.into_any();
        }
    };
    log::info!("backend: {}", config.url);

    let hosted = Arc::new(HostedBackend::new(config));
    let restoring = hosted.clone();
    leptos::task::spawn_local(async move {
        restoring.restore_session().await;
    });
    let backend: SharedBackend = hosted;
    provide_context(backend);

    view! {
        <Title text="Nexus.comm"/>
        <Toaster/>
        <Router>
            <Routes fallback=|| view! { <Redirect path="/"/> }>
                <Route path=StaticSegment("auth") view=AuthPage/>
                <Route path=StaticSegment("") view=|| view! { <SessionGuard><FeedPage/></SessionGuard> }/>
                <Route path=StaticSegment("create") view=|| view! { <SessionGuard><CreatePage/></SessionGuard> }/>
                <Route path=StaticSegment("search") view=|| view! { <SessionGuard><SearchPage/></SessionGuard> }/>
                <Route
                    path=StaticSegment("activity")
                    view=|| view! { <SessionGuard><ActivityPage/></SessionGuard> }
                />
                <Route
                    path=StaticSegment("profile")
                    view=|| view! { <SessionGuard><ProfilePage/></SessionGuard> }
                />
            </Routes>
        </Router>
    }
    .into_any()
}

#[component]
fn ConfigErrorScreen(message: String) -> impl IntoView {
    view! {
        <Title text="Nexus.comm"/>
        <div class="config-error" role="alert">
            <h1>"Backend not configured"</h1>
            <p>{message}</p>
            <p>"Set NEXUS_BACKEND_URL and NEXUS_BACKEND_ANON_KEY at build time."</p>
        </div>
    }
}
