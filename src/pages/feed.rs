//! Home feed: every post, newest first.

use leptos::prelude::*;

use crate::components::navigation::Navigation;
use crate::components::spinner::Spinner;
use crate::components::toaster::{notify_error, notify_success};
use crate::net::api;
use crate::net::backend::SharedBackend;
use crate::net::types::FeedPost;
use crate::state::notice::NoticeState;
use crate::state::view::ViewState;

#[component]
pub fn FeedPage() -> impl IntoView {
    let backend = expect_context::<SharedBackend>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let feed = RwSignal::new(ViewState::<FeedPost>::Loading);

    {
        let backend = backend.clone();
        leptos::task::spawn_local(async move {
            let (state, err) = ViewState::settle(api::fetch_feed(backend.as_ref()).await);
            if let Some(err) = err {
                notify_error(notices, &err);
            }
            feed.try_set(state);
        });
    }

    let on_like = Callback::new(move |post_id: String| {
        let backend = backend.clone();
        leptos::task::spawn_local(async move {
            match api::like_post(backend.as_ref(), &post_id).await {
                Ok(()) => notify_success(notices, "Liked", "Added to your activity."),
                Err(e) => notify_error(notices, &e),
            }
        });
    });

    view! {
        <div class="page">
            <main class="page__content">
                <header class="page__header">
                    <h1>"Home"</h1>
                </header>
                {move || match feed.get() {
                    ViewState::Loading => view! { <Spinner/> }.into_any(),
                    ViewState::Empty => view! { <p class="page__empty">"No posts yet"</p> }.into_any(),
                    ViewState::Ready(posts) => view! {
                        <div class="feed">
                            {posts.into_iter().map(|post| view! { <FeedCard post=post on_like=on_like/> }).collect_view()}
                        </div>
                    }
                    .into_any(),
                }}
            </main>
            <Navigation/>
        </div>
    }
}

#[component]
fn FeedCard(post: FeedPost, on_like: Callback<String>) -> impl IntoView {
    let author = post.author_name().to_owned();
    let alt = post.post.alt_text().to_owned();
    let caption = post.post.caption.clone().unwrap_or_default();
    let category = post.post.category.clone();
    let image_url = post.post.image_url.clone();
    let id = post.post.id;

    view! {
        <article class="feed-card">
            <div class="feed-card__header">
                <span class="feed-card__avatar" aria-hidden="true"></span>
                <span class="feed-card__author">{author.clone()}</span>
                {category.map(|c| view! { <span class="badge">{c}</span> })}
            </div>
            <img class="feed-card__image" src=image_url alt=alt loading="lazy"/>
            <div class="feed-card__body">
                <button
                    class="feed-card__like"
                    title="Like"
                    aria-label="Like"
                    on:click=move |_| on_like.run(id.clone())
                >
                    "♡"
                </button>
                <p class="feed-card__caption">
                    <strong>{author}</strong>
                    " "
                    {caption}
                </p>
            </div>
        </article>
    }
}
