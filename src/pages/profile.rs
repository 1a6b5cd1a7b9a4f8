//! Signed-in user's profile and own posts, plus sign-out.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::navigation::Navigation;
use crate::components::post_grid::PostGrid;
use crate::components::spinner::Spinner;
use crate::components::toaster::notify_error;
use crate::net::api;
use crate::net::backend::SharedBackend;
use crate::net::types::{Post, Profile};
use crate::state::guard::LOGIN_PATH;
use crate::state::notice::NoticeState;
use crate::state::view::ViewState;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let backend = expect_context::<SharedBackend>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let profile = RwSignal::new(None::<Profile>);
    let posts = RwSignal::new(ViewState::<Post>::Loading);

    {
        let backend = backend.clone();
        leptos::task::spawn_local(async move {
            let (profile_result, posts_result) = api::fetch_profile_page(backend.as_ref()).await;
            match profile_result {
                Ok(row) => {
                    profile.try_set(Some(row));
                }
                Err(e) => notify_error(notices, &e),
            }
            let (state, err) = ViewState::settle(posts_result);
            if let Some(err) = err {
                notify_error(notices, &err);
            }
            posts.try_set(state);
        });
    }

    let on_sign_out = move |_| {
        let backend = backend.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::sign_out(backend.as_ref()).await {
                Ok(()) => navigate(LOGIN_PATH, NavigateOptions::default()),
                Err(e) => notify_error(notices, &e),
            }
        });
    };

    let username = move || profile.get().and_then(|p| p.username).unwrap_or_default();

    view! {
        <div class="page">
            <main class="page__content">
                <header class="page__header page__header--split">
                    <h1>"Profile"</h1>
                    <button class="btn btn--outline" on:click=on_sign_out>
                        "Sign Out"
                    </button>
                </header>
                <Show when=move || !posts.get().is_loading() fallback=|| view! { <Spinner/> }>
                    <section class="profile">
                        <div class="profile__avatar" aria-hidden="true"></div>
                        <h2 class="profile__name">{username}</h2>
                    </section>
                    <section class="profile__posts">
                        <h3>"Posts"</h3>
                        {move || match posts.get() {
                            ViewState::Ready(rows) => view! { <PostGrid posts=rows/> }.into_any(),
                            ViewState::Loading | ViewState::Empty => {
                                view! { <p class="page__empty">"No posts yet"</p> }.into_any()
                            }
                        }}
                    </section>
                </Show>
            </main>
            <Navigation/>
        </div>
    }
}
