//! Posts the signed-in user liked, newest like first.

use leptos::prelude::*;

use crate::components::navigation::Navigation;
use crate::components::spinner::Spinner;
use crate::components::toaster::notify_error;
use crate::net::api;
use crate::net::backend::SharedBackend;
use crate::net::types::LikeActivity;
use crate::state::notice::NoticeState;
use crate::state::view::ViewState;
use crate::util::dates::short_date;

#[component]
pub fn ActivityPage() -> impl IntoView {
    let backend = expect_context::<SharedBackend>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let activity = RwSignal::new(ViewState::<LikeActivity>::Loading);

    leptos::task::spawn_local(async move {
        let (state, err) = ViewState::settle(api::fetch_activity(backend.as_ref()).await);
        if let Some(err) = err {
            notify_error(notices, &err);
        }
        activity.try_set(state);
    });

    view! {
        <div class="page">
            <main class="page__content">
                <header class="page__header">
                    <h1>"Activity"</h1>
                </header>
                {move || match activity.get() {
                    ViewState::Loading => view! { <Spinner/> }.into_any(),
                    ViewState::Empty => view! { <p class="page__empty">"No activity yet"</p> }.into_any(),
                    ViewState::Ready(rows) => view! {
                        <ul class="activity">
                            {rows.into_iter().map(activity_row).collect_view()}
                        </ul>
                    }
                    .into_any(),
                }}
            </main>
            <Navigation/>
        </div>
    }
}

fn activity_row(like: LikeActivity) -> impl IntoView {
    let thumbnail = like.post.map(|p| p.image_url);
    view! {
        <li class="activity__item">
            {thumbnail.map(|src| view! { <img class="activity__thumb" src=src alt=""/> })}
            <div>
                <p class="activity__text">"You liked a post"</p>
                <p class="activity__date">{short_date(&like.created_at)}</p>
            </div>
        </li>
    }
}
