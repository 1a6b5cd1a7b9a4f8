//! Notice stack plus the helpers views use to raise notices.
//!
//! DESIGN
//! ======
//! Views never touch the queue directly; they call [`notify_error`] or
//! [`notify_success`], which also schedule the auto-dismiss timer in the
//! browser. The queue signal lives at the app root, so timers that fire after
//! the raising view unmounted still land.

use leptos::prelude::*;

use crate::error::AppError;
use crate::state::notice::{Notice, NoticeKind, NoticeState};

/// Raise the standard error notice for `err`.
pub fn notify_error(notices: RwSignal<NoticeState>, err: &AppError) {
    let id = notices.try_update(|n| n.error(err));
    schedule_dismiss(notices, id);
}

pub fn notify_success(notices: RwSignal<NoticeState>, title: &str, description: &str) {
    let id = notices.try_update(|n| n.success(title, description));
    schedule_dismiss(notices, id);
}

fn schedule_dismiss(notices: RwSignal<NoticeState>, id: Option<u64>) {
    #[cfg(feature = "csr")]
    if let Some(id) = id {
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(crate::state::notice::AUTO_DISMISS_MS).await;
            let _ = notices.try_update(|n| n.dismiss(id));
        });
    }
    #[cfg(not(feature = "csr"))]
    let _ = (notices, id);
}

#[component]
pub fn Toaster() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="toaster" aria-live="polite">
            <For
                each=move || notices.get().items
                key=|notice| notice.id
                children=move |notice: Notice| {
                    let id = notice.id;
                    let is_error = notice.kind == NoticeKind::Error;
                    let description = (!notice.description.is_empty()).then_some(notice.description);
                    view! {
                        <div class="toast" class:toast--error=is_error role="alert">
                            <div class="toast__body">
                                <strong class="toast__title">{notice.title}</strong>
                                {description.map(|text| view! { <p class="toast__description">{text}</p> })}
                            </div>
                            <button
                                class="toast__close"
                                title="Dismiss"
                                aria-label="Dismiss"
                                on:click=move |_| {
                                    notices.update(|n| {
                                        n.dismiss(id);
                                    });
                                }
                            >
                                "✕"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
