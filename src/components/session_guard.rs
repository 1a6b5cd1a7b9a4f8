//! Route wrapper that renders its children only for a signed-in viewer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every route except `/auth`. The subscription is acquired when the
//! component is created and released in `on_cleanup`, so leaving the route
//! tears it down even while a notification is in flight.
//!
//! DESIGN
//! ======
//! The auth handler never navigates directly; it bumps a redirect request
//! signal, and an effect performs the navigation outside the notification
//! callback.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::spinner::Spinner;
use crate::net::backend::SharedBackend;
use crate::net::events::AuthEvents;
use crate::state::guard::{GuardPhase, mount_guard};

#[component]
pub fn SessionGuard(children: ChildrenFn) -> impl IntoView {
    let backend = expect_context::<SharedBackend>();
    let phase = RwSignal::new(GuardPhase::Undetermined);
    let redirect = RwSignal::new(None::<(u64, String)>);

    let events: Arc<dyn AuthEvents> = backend;
    let mounted = mount_guard(
        events,
        move |path| {
            redirect.try_update(|r| {
                let seq = r.as_ref().map_or(0, |(seq, _)| seq + 1);
                *r = Some((seq, path.to_owned()));
            });
        },
        move |next| {
            phase.try_set(next);
        },
    );
    match mounted {
        Ok(subscription) => on_cleanup(move || drop(subscription)),
        Err(e) => {
            log::error!("guard: {e}");
            phase.set(GuardPhase::Failed(e.to_string()));
        }
    }

    let navigate = use_navigate();
    Effect::new(move || {
        if let Some((_, path)) = redirect.get() {
            navigate(&path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let current = Memo::new(move |_| phase.get());
    move || match current.get() {
        GuardPhase::Authenticated => children().into_any(),
        GuardPhase::Undetermined => view! { <Spinner/> }.into_any(),
        GuardPhase::Unauthenticated => view! { <Spinner label="Redirecting to sign in..."/> }.into_any(),
        GuardPhase::Failed(message) => view! {
            <div class="guard-error" role="alert">
                <h2>"Unable to check your session"</h2>
                <p>{message}</p>
            </div>
        }
        .into_any(),
    }
}
