//! Sign-in page: credential form plus a password-reset request.

#[cfg(test)]
#[path = "sign_in_test.rs"]
mod sign_in_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::guard::install_auth_redirect;
use crate::net::error::ApiError;
use crate::net::types::LoginCredentials;
use crate::session::AccountSession;
use crate::session::state::PendingOp;
use crate::util::validate::{email_format_ok, validate_sign_in};

/// Map a login failure to the message the form shows. A 401 is always the
/// generic credentials message; validation payloads render verbatim.
fn sign_in_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status: 401, .. } => "Invalid email or password".to_owned(),
        ApiError::Status { status, detail } if detail.is_empty() => {
            format!("Sign in failed (status {status})")
        }
        other => other.to_string(),
    }
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let session = expect_context::<AccountSession>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(Vec::<String>::new());
    let api_error = RwSignal::new(None::<String>);
    let info = RwSignal::new(None::<String>);

    // Already signed in? Straight to the dashboard.
    install_auth_redirect(&session, navigate.clone());

    let busy = Signal::derive({
        let session = session.clone();
        move || session.pending() != PendingOp::None
    });

    let session_submit = session.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session_submit.pending() != PendingOp::None {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let found = validate_sign_in(&email_value, &password.get());
        if !found.is_empty() {
            errors.set(found);
            return;
        }
        errors.set(Vec::new());
        api_error.set(None);
        info.set(None);
        let credentials = LoginCredentials {
            email: email_value,
            password: password.get(),
        };
        #[cfg(feature = "hydrate")]
        {
            let session = session_submit.clone();
            leptos::task::spawn_local(async move {
                // Success is observed through the cache: the re-fetched user
                // flips the slot to Present and the redirect effect fires.
                if let Err(err) = session.login(&credentials).await {
                    api_error.set(Some(sign_in_error_message(&err)));
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
        }
    };

    let session_reset = session.clone();
    let on_forgot = move |_| {
        let email_value = email.get().trim().to_owned();
        if !email_format_ok(&email_value) {
            errors.set(vec!["Enter your email first".to_owned()]);
            return;
        }
        errors.set(Vec::new());
        #[cfg(feature = "hydrate")]
        {
            let session = session_reset.clone();
            leptos::task::spawn_local(async move {
                match session.reset_password(&email_value).await {
                    Ok(()) => info.set(Some("Password reset email sent.".to_owned())),
                    Err(err) => api_error.set(Some(err.to_string())),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session_reset, email_value);
        }
    };

    view! {
        <main class="auth-page">
            <div class="auth-card">
                <h1>"Sign In"</h1>
                <Show when=move || api_error.get().is_some()>
                    <p class="auth-error" role="alert">{move || api_error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || !errors.get().is_empty()>
                    <ul class="auth-error-list" role="alert">
                        {move || {
                            errors
                                .get()
                                .into_iter()
                                .map(|msg| view! { <li>{msg}</li> })
                                .collect::<Vec<_>>()
                        }}
                    </ul>
                </Show>
                <Show when=move || info.get().is_some()>
                    <p class="auth-info">{move || info.get().unwrap_or_default()}</p>
                </Show>
                <form class="auth-form" on:submit=on_submit novalidate>
                    <label class="auth-form__label">
                        "Email address"
                        <input
                            class="auth-form__input"
                            type="email"
                            autocomplete="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-form__label">
                        "Password"
                        <input
                            class="auth-form__input"
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="auth-form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <button class="auth-link" on:click=on_forgot>
                    "Forgot your password?"
                </button>
                <p class="auth-footer">
                    "Don't have an account? "
                    <a href="/signup">"Sign up"</a>
                </p>
            </div>
        </main>
    }
}
