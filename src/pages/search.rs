//! Caption search.
//!
//! Every keystroke issues a new request. Responses can settle out of order,
//! so each request carries a generation number and only the latest one is
//! allowed to update the view.

use leptos::prelude::*;

use crate::components::navigation::Navigation;
use crate::components::post_grid::PostGrid;
use crate::components::spinner::Spinner;
use crate::components::toaster::notify_error;
use crate::net::api;
use crate::net::backend::SharedBackend;
use crate::net::types::Post;
use crate::state::notice::NoticeState;
use crate::state::view::ViewState;

#[component]
pub fn SearchPage() -> impl IntoView {
    let backend = expect_context::<SharedBackend>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    let term = RwSignal::new(String::new());
    let results = RwSignal::new(ViewState::<Post>::Empty);
    let generation = RwSignal::new(0_u64);

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        term.set(value.clone());
        let current = generation.get_untracked() + 1;
        generation.set(current);

        if value.trim().is_empty() {
            results.set(ViewState::Empty);
            return;
        }
        results.set(ViewState::Loading);
        let backend = backend.clone();
        leptos::task::spawn_local(async move {
            let result = api::search_posts(backend.as_ref(), &value).await;
            if generation.try_get_untracked() != Some(current) {
                return;
            }
            let (state, err) = ViewState::settle(result);
            if let Some(err) = err {
                notify_error(notices, &err);
            }
            results.try_set(state);
        });
    };

    view! {
        <div class="page">
            <main class="page__content">
                <header class="page__header">
                    <h1>"Search"</h1>
                    <input
                        class="form-input"
                        type="search"
                        placeholder="Search posts..."
                        prop:value=move || term.get()
                        on:input=on_input
                    />
                </header>
                {move || match results.get() {
                    ViewState::Loading => view! { <Spinner/> }.into_any(),
                    ViewState::Empty => view! { <p class="page__empty">"No posts found"</p> }.into_any(),
                    ViewState::Ready(posts) => view! { <PostGrid posts=posts columns=2/> }.into_any(),
                }}
            </main>
            <Navigation/>
        </div>
    }
}
