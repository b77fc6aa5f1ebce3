//! Sign-up page: registration form and the post-registration success view.

#[cfg(test)]
#[path = "sign_up_test.rs"]
mod sign_up_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::guard::install_auth_redirect;
use crate::net::types::RegisterForm;
use crate::session::AccountSession;
use crate::session::state::PendingOp;
use crate::util::validate::{today_iso, validate_sign_up};

/// Trimmed optional form field: blank input means "not provided", which the
/// wire layer then omits from the payload entirely.
fn optional_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let session = expect_context::<AccountSession>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password1 = RwSignal::new(String::new());
    let password2 = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let phone_number = RwSignal::new(String::new());
    let date_of_birth = RwSignal::new(String::new());
    let accepted_terms = RwSignal::new(false);
    let accepted_privacy = RwSignal::new(false);
    let marketing_emails = RwSignal::new(false);

    let errors = RwSignal::new(Vec::<String>::new());
    let api_error = RwSignal::new(None::<String>);
    // Holds the registered address once the account is created; switches the
    // page to the "check your inbox" view.
    let registered_email = RwSignal::new(None::<String>);

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
        let form = RegisterForm {
            email: email.get().trim().to_owned(),
            password1: password1.get(),
            password2: password2.get(),
            first_name: optional_field(&first_name.get()),
            last_name: optional_field(&last_name.get()),
            phone_number: optional_field(&phone_number.get()),
            date_of_birth: date_of_birth.get().trim().to_owned(),
            accepted_terms: accepted_terms.get(),
            accepted_privacy_policy: accepted_privacy.get(),
            marketing_emails: marketing_emails.get().then_some(true),
            ..RegisterForm::default()
        };
        let found = validate_sign_up(&form, &today_iso());
        if !found.is_empty() {
            errors.set(found);
            return;
        }
        errors.set(Vec::new());
        api_error.set(None);
        #[cfg(feature = "hydrate")]
        {
            let session = session_submit.clone();
            leptos::task::spawn_local(async move {
                match session.register(&form).await {
                    Ok(()) => registered_email.set(Some(form.email.clone())),
                    Err(err) => api_error.set(Some(err.to_string())),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = form;
        }
    };

    view! {
        <main class="auth-page">
            <Show
                when=move || registered_email.get().is_none()
                fallback=move || {
                    view! {
                        <RegistrationSuccess email=registered_email.get().unwrap_or_default()/>
                    }
                }
            >
                <div class="auth-card auth-card--wide">
                    <h1>"Create Account"</h1>
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
                    <form class="auth-form" on:submit=on_submit.clone() novalidate>
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
                        <div class="auth-form__row">
                            <label class="auth-form__label">
                                "First name"
                                <input
                                    class="auth-form__input"
                                    type="text"
                                    prop:value=move || first_name.get()
                                    on:input=move |ev| first_name.set(event_target_value(&ev))
                                />
                            </label>
                            <label class="auth-form__label">
                                "Last name"
                                <input
                                    class="auth-form__input"
                                    type="text"
                                    prop:value=move || last_name.get()
                                    on:input=move |ev| last_name.set(event_target_value(&ev))
                                />
                            </label>
                        </div>
                        <label class="auth-form__label">
                            "Phone number"
                            <input
                                class="auth-form__input"
                                type="tel"
                                prop:value=move || phone_number.get()
                                on:input=move |ev| phone_number.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="auth-form__label">
                            "Date of birth"
                            <input
                                class="auth-form__input"
                                type="date"
                                prop:value=move || date_of_birth.get()
                                on:input=move |ev| date_of_birth.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="auth-form__label">
                            "Password"
                            <input
                                class="auth-form__input"
                                type="password"
                                autocomplete="new-password"
                                prop:value=move || password1.get()
                                on:input=move |ev| password1.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="auth-form__label">
                            "Confirm password"
                            <input
                                class="auth-form__input"
                                type="password"
                                autocomplete="new-password"
                                prop:value=move || password2.get()
                                on:input=move |ev| password2.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="auth-form__check">
                            <input
                                type="checkbox"
                                prop:checked=move || accepted_terms.get()
                                on:change=move |ev| accepted_terms.set(event_target_checked(&ev))
                            />
                            "I accept the terms and conditions"
                        </label>
                        <label class="auth-form__check">
                            <input
                                type="checkbox"
                                prop:checked=move || accepted_privacy.get()
                                on:change=move |ev| accepted_privacy.set(event_target_checked(&ev))
                            />
                            "I accept the privacy policy"
                        </label>
                        <label class="auth-form__check">
                            <input
                                type="checkbox"
                                prop:checked=move || marketing_emails.get()
                                on:change=move |ev| marketing_emails.set(event_target_checked(&ev))
                            />
                            "Send me occasional product updates"
                        </label>
                        <button class="auth-form__submit" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Creating account..." } else { "Create account" }}
                        </button>
                    </form>
                    <p class="auth-footer">
                        "Already have an account? "
                        <a href="/signin">"Sign in"</a>
                    </p>
                </div>
            </Show>
        </main>
    }
}

/// Post-registration view prompting the user to verify their address.
#[component]
fn RegistrationSuccess(email: String) -> impl IntoView {
    view! {
        <div class="auth-card">
            <h1>"Almost there"</h1>
            <p>
                "We sent a verification link to "
                <strong>{email}</strong>
                ". Follow it to activate your account."
            </p>
            <p class="auth-footer">
                <a href="/signin">"Go to sign in"</a>
            </p>
        </div>
    }
}
