//! Sign-in / sign-up page. The only route outside the session guard.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::toaster::{notify_error, notify_success};
use crate::error::AppError;
use crate::net::backend::SharedBackend;
use crate::state::notice::NoticeState;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }
}

/// Trimmed, validated form input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Present only for sign-up.
    pub username: Option<String>,
}

/// Validate the form for `mode`. The password is not trimmed.
///
/// # Errors
///
/// [`AppError::Validation`] naming the first missing or too-short field.
pub fn validate_credentials(
    mode: AuthMode,
    email: &str,
    password: &str,
    username: &str,
) -> Result<Credentials, AppError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::validation("Enter your email."));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        )));
    }
    let username = match mode {
        AuthMode::SignIn => None,
        AuthMode::SignUp => {
            let username = username.trim();
            if username.is_empty() {
                return Err(AppError::validation("Choose a username."));
            }
            Some(username.to_owned())
        }
    };
    Ok(Credentials { email: email.to_owned(), password: password.to_owned(), username })
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let backend = expect_context::<SharedBackend>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let mode = RwSignal::new(AuthMode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let current_mode = mode.get_untracked();
        let creds = match validate_credentials(
            current_mode,
            &email.get_untracked(),
            &password.get_untracked(),
            &username.get_untracked(),
        ) {
            Ok(creds) => creds,
            Err(e) => {
                notify_error(notices, &e);
                return;
            }
        };

        busy.set(true);
        let backend = backend.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let result = match &creds.username {
                None => backend.sign_in(&creds.email, &creds.password).await.map(Some),
                Some(name) => backend.sign_up(&creds.email, &creds.password, name).await,
            };
            busy.try_set(false);
            match result {
                Ok(Some(_)) => navigate("/", NavigateOptions::default()),
                Ok(None) => {
                    notify_success(notices, "Check your email", "Confirm your address, then sign in.");
                    mode.try_set(AuthMode::SignIn);
                }
                Err(e) => notify_error(notices, &AppError::from(e)),
            }
        });
    };

    let is_sign_up = move || mode.get() == AuthMode::SignUp;

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-card__title">"Nexus.comm"</h1>
                <p class="auth-card__subtitle">
                    {move || if is_sign_up() { "Create an account" } else { "Sign in to continue" }}
                </p>
                <form class="auth-form" on:submit=on_submit>
                    <Show when=is_sign_up>
                        <input
                            class="form-input"
                            type="text"
                            placeholder="Username"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="form-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="form-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || match (busy.get(), is_sign_up()) {
                            (true, _) => "Please wait...",
                            (false, true) => "Sign Up",
                            (false, false) => "Sign In",
                        }}
                    </button>
                </form>
                <button class="btn btn--link" type="button" on:click=move |_| mode.update(|m| *m = m.toggled())>
                    {move || {
                        if is_sign_up() {
                            "Already have an account? Sign in"
                        } else {
                            "Don't have an account? Sign up"
                        }
                    }}
                </button>
            </div>
        </div>
    }
}
