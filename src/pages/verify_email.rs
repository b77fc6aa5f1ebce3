//! Email verification landing page.
//!
//! The verification link in the email points here with the confirmation key
//! in the query string (`/verify-email?key=...`). On load the key is posted
//! to the server and the outcome rendered.

#[cfg(test)]
#[path = "verify_email_test.rs"]
mod verify_email_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::components::spinner::Spinner;
use crate::session::AccountSession;

/// Extract the `key` parameter from a raw query string (with or without the
/// leading `?`). Percent-decoding is left to the server; keys are opaque
/// URL-safe tokens.
fn verification_key(search: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == "key")
        .map(|(_, value)| value.to_owned())
        .filter(|value| !value.is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum VerifyState {
    Verifying,
    Verified,
    Failed(String),
}

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let session = expect_context::<AccountSession>();
    let location = use_location();

    let state = RwSignal::new(VerifyState::Verifying);

    let key = verification_key(&location.search.get_untracked());
    match key {
        None => state.set(VerifyState::Failed(
            "The verification link is missing its confirmation key.".to_owned(),
        )),
        Some(key) => {
            #[cfg(feature = "hydrate")]
            {
                let session = session.clone();
                leptos::task::spawn_local(async move {
                    match session.verify_email(&key).await {
                        Ok(()) => state.set(VerifyState::Verified),
                        Err(err) => state.set(VerifyState::Failed(err.to_string())),
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (&session, key);
            }
        }
    }

    view! {
        <main class="auth-page">
            <div class="auth-card">
                {move || match state.get() {
                    VerifyState::Verifying => view! {
                        <h1>"Verifying your email"</h1>
                        <Spinner label="Confirming your address..."/>
                    }
                    .into_any(),
                    VerifyState::Verified => view! {
                        <h1>"Email verified"</h1>
                        <p>"Your email address has been confirmed. You can sign in now."</p>
                        <p class="auth-footer">
                            <a href="/signin">"Go to sign in"</a>
                        </p>
                    }
                    .into_any(),
                    VerifyState::Failed(reason) => view! {
                        <h1>"Verification failed"</h1>
                        <p class="auth-error" role="alert">{reason}</p>
                        <p>
                            "The link may have expired. Sign in and request a new \
                             verification email from your settings."
                        </p>
                        <p class="auth-footer">
                            <a href="/signin">"Go to sign in"</a>
                        </p>
                    }
                    .into_any(),
                }}
            </div>
        </main>
    }
}
