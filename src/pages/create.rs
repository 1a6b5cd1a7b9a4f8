//! Create-post form: image picker with preview, category, caption.
//!
//! DESIGN
//! ======
//! The draft is checked locally before anything is spawned, so a submit
//! without an image raises a validation notice and never reaches the
//! backend. The selected file is read into memory on change; the preview
//! uses an object URL that is revoked on replacement and on unmount.
//! Reads are ticketed through [`ImagePick`], and submit stays disabled
//! while the latest read is pending.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::navigation::Navigation;
use crate::components::toaster::{notify_error, notify_success};
use crate::net::api;
use crate::net::backend::SharedBackend;
use crate::state::compose::{CATEGORIES, ImagePick, PostDraft};
use crate::state::notice::NoticeState;

#[component]
pub fn CreatePage() -> impl IntoView {
    let backend = expect_context::<SharedBackend>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let caption = RwSignal::new(String::new());
    let category = RwSignal::new(CATEGORIES[0].to_owned());
    let pick = RwSignal::new(ImagePick::default());
    let preview = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_file = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            use crate::error::AppError;
            use crate::util::file;

            let Some(picked) = file::selected_file(&ev) else {
                return;
            };
            if let Some(old) = preview.get_untracked() {
                file::revoke_preview(&old);
            }
            preview.set(file::preview_url(&picked));
            let Some(ticket) = pick.try_update(ImagePick::begin) else {
                return;
            };
            leptos::task::spawn_local(async move {
                let result = file::read_image(&picked).await;
                let current = pick.try_update(|p| p.finish(ticket, result.as_ref().ok().cloned()));
                if current != Some(true) {
                    log::debug!("create: dropped stale read of {}", picked.name());
                    return;
                }
                if let Err(e) = result {
                    log::warn!("create: file read failed: {e}");
                    if let Some(url) = preview.try_get_untracked().flatten() {
                        file::revoke_preview(&url);
                    }
                    preview.try_set(None);
                    notify_error(notices, &AppError::validation("Could not read the selected image"));
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = ev;
    };

    #[cfg(feature = "csr")]
    on_cleanup(move || {
        if let Some(url) = preview.try_get_untracked().flatten() {
            crate::util::file::revoke_preview(&url);
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() || pick.with_untracked(ImagePick::is_reading) {
            return;
        }
        let draft = PostDraft {
            caption: caption.get_untracked(),
            category: category.get_untracked(),
            image: pick.with_untracked(|p| p.image().cloned()),
        };
        if let Err(e) = draft.validate() {
            notify_error(notices, &e);
            return;
        }

        busy.set(true);
        let backend = backend.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let result = api::create_post(backend.as_ref(), &draft).await;
            busy.try_set(false);
            match result {
                Ok(()) => {
                    notify_success(notices, "Success!", "Your post has been created.");
                    navigate("/", NavigateOptions::default());
                }
                Err(e) => notify_error(notices, &e),
            }
        });
    };

    view! {
        <div class="page">
            <main class="page__content">
                <header class="page__header">
                    <h1>"Create Post"</h1>
                </header>
                <form class="create-form" on:submit=on_submit>
                    <label class="form-label">"Image"</label>
                    <div class="image-drop">
                        {move || match preview.get() {
                            Some(url) => view! { <img class="image-drop__preview" src=url alt="Preview"/> }.into_any(),
                            None => view! { <span class="image-drop__hint">"Click to upload an image"</span> }.into_any(),
                        }}
                        <input class="image-drop__input" type="file" accept="image/*" on:change=on_file/>
                    </div>

                    <label class="form-label">"Category"</label>
                    <select
                        class="form-input"
                        prop:value=move || category.get()
                        on:change=move |ev| category.set(event_target_value(&ev))
                    >
                        {CATEGORIES.iter().map(|c| view! { <option value=*c>{*c}</option> }).collect_view()}
                    </select>

                    <label class="form-label">"Caption"</label>
                    <textarea
                        class="form-input form-input--caption"
                        placeholder="Write a caption..."
                        prop:value=move || caption.get()
                        on:input=move |ev| caption.set(event_target_value(&ev))
                    ></textarea>

                    <button
                        class="btn btn--primary"
                        type="submit"
                        disabled=move || busy.get() || pick.with(ImagePick::is_reading)
                    >
                        {move || {
                            if busy.get() {
                                "Posting..."
                            } else if pick.with(ImagePick::is_reading) {
                                "Reading image..."
                            } else {
                                "Post"
                            }
                        }}
                    </button>
                </form>
            </main>
            <Navigation/>
        </div>
    }
}
