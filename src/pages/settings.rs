//! Account settings: profile editing, security, and account removal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Exercises every mutation contract of the session core: direct cache
//! writes (profile edit), invalidate-and-refetch (email change, marketing
//! preferences), no cache effect (password change, verification email),
//! and sign-out-on-success (account deletion).

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::guard::install_unauth_redirect;
use crate::components::spinner::Spinner;
use crate::net::types::{EmailChange, MarketingPreferences, PasswordChange, ProfileUpdate, User};
use crate::session::AccountSession;
use crate::util::validate::{validate_email_change, validate_password_change};

/// Tabs available on the settings page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SettingsTab {
    #[default]
    Profile,
    Security,
    Advanced,
}

impl SettingsTab {
    fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Security => "Security",
            Self::Advanced => "Advanced",
        }
    }
}

const TABS: [SettingsTab; 3] = [SettingsTab::Profile, SettingsTab::Security, SettingsTab::Advanced];

/// Build a PATCH body from the editable inputs. Blank fields are omitted,
/// so the server leaves the stored value untouched.
fn profile_patch(first_name: &str, last_name: &str, phone_number: &str) -> ProfileUpdate {
    fn field(value: &str) -> Option<String> {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
    ProfileUpdate {
        first_name: field(first_name),
        last_name: field(last_name),
        phone_number: field(phone_number),
        ..ProfileUpdate::default()
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let session = expect_context::<AccountSession>();
    let navigate = use_navigate();

    install_unauth_redirect(&session, navigate.clone());

    let cache = session.cache().clone();
    let user = Signal::derive(move || cache.read().user().cloned());

    let tab = RwSignal::new(SettingsTab::default());
    // Page-wide outcome banners, written by whichever form last resolved.
    let notice = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);

    let navigate_back = navigate.clone();
    let on_back = move |_| navigate_back("/dashboard", NavigateOptions::default());

    view! {
        <Show
            when=move || user.get().is_some()
            fallback=move || view! { <main class="page"><Spinner/></main> }
        >
            <main class="page">
                <header class="page__header">
                    <h1>"Account Settings"</h1>
                    <button class="btn" on:click=on_back.clone()>"Back to Dashboard"</button>
                </header>
                <nav class="tabs">
                    {TABS
                        .into_iter()
                        .map(|t| {
                            view! {
                                <button
                                    class="tabs__tab"
                                    class:tabs__tab--active=move || tab.get() == t
                                    on:click=move |_| {
                                        tab.set(t);
                                        notice.set(None);
                                        error.set(None);
                                    }
                                >
                                    {t.label()}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </nav>
                <Show when=move || notice.get().is_some()>
                    <p class="page__notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || error.get().is_some()>
                    <p class="page__error" role="alert">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || tab.get() == SettingsTab::Profile>
                    <ProfileTab user=user notice=notice error=error/>
                </Show>
                <Show when=move || tab.get() == SettingsTab::Security>
                    <section class="card">
                        <PasswordChangeForm notice=notice error=error/>
                        <EmailChangeForm notice=notice error=error/>
                    </section>
                </Show>
                <Show when=move || tab.get() == SettingsTab::Advanced>
                    <DeleteAccountForm error=error/>
                </Show>
            </main>
        </Show>
    }
}

/// Profile tab: identity facts, the edit form, verification and marketing
/// controls.
#[component]
fn ProfileTab(
    user: Signal<Option<User>>,
    notice: RwSignal<Option<String>>,
    error: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = expect_context::<AccountSession>();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let phone_number = RwSignal::new(String::new());
    let editing = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let on_edit = move |_| {
        if let Some(current) = user.get_untracked() {
            first_name.set(current.first_name.unwrap_or_default());
            last_name.set(current.last_name.unwrap_or_default());
            phone_number.set(current.phone_number.unwrap_or_default());
        }
        editing.set(true);
    };

    let session_save = session.clone();
    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let patch = profile_patch(&first_name.get(), &last_name.get(), &phone_number.get());
        busy.set(true);
        #[cfg(feature = "hydrate")]
        {
            let session = session_save.clone();
            leptos::task::spawn_local(async move {
                match session.update_profile(&patch).await {
                    Ok(_) => {
                        notice.set(Some("Profile updated successfully".to_owned()));
                        editing.set(false);
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session_save, patch, notice, error);
        }
    };

    let session_resend = session.clone();
    let on_resend = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let session = session_resend.clone();
            leptos::task::spawn_local(async move {
                match session.resend_verification_email().await {
                    Ok(()) => notice.set(Some(
                        "Verification email sent. Please check your inbox.".to_owned(),
                    )),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session_resend, notice, error);
        }
    };

    let session_prefs = session.clone();
    let on_marketing_toggle = move |ev: leptos::ev::Event| {
        let prefs = MarketingPreferences {
            marketing_emails: event_target_checked(&ev),
        };
        #[cfg(feature = "hydrate")]
        {
            let session = session_prefs.clone();
            leptos::task::spawn_local(async move {
                match session.update_marketing_prefs(&prefs).await {
                    Ok(()) => notice.set(Some("Preferences updated successfully".to_owned())),
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session_prefs, prefs, notice, error);
        }
    };

    view! {
        <section class="card">
            <h2>"Personal Information"</h2>
            <Show
                when=move || editing.get()
                fallback=move || {
                    view! {
                        <dl class="card__facts">
                            <div>
                                <dt>"Full name"</dt>
                                <dd>
                                    {move || {
                                        user.get()
                                            .and_then(|u| match (u.first_name, u.last_name) {
                                                (Some(first), Some(last)) => Some(format!("{first} {last}")),
                                                (Some(first), None) => Some(first),
                                                _ => None,
                                            })
                                            .unwrap_or_else(|| "Not provided".to_owned())
                                    }}
                                </dd>
                            </div>
                            <div>
                                <dt>"Phone number"</dt>
                                <dd>
                                    {move || {
                                        user.get()
                                            .and_then(|u| u.phone_number)
                                            .unwrap_or_else(|| "Not provided".to_owned())
                                    }}
                                </dd>
                            </div>
                        </dl>
                        <button class="btn" on:click=on_edit>"Edit Profile"</button>
                    }
                }
            >
                <form class="settings-form" on:submit=on_save.clone()>
                    <label class="settings-form__label">
                        "First name"
                        <input
                            class="settings-form__input"
                            type="text"
                            prop:value=move || first_name.get()
                            on:input=move |ev| first_name.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="settings-form__label">
                        "Last name"
                        <input
                            class="settings-form__input"
                            type="text"
                            prop:value=move || last_name.get()
                            on:input=move |ev| last_name.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="settings-form__label">
                        "Phone number"
                        <input
                            class="settings-form__input"
                            type="tel"
                            prop:value=move || phone_number.get()
                            on:input=move |ev| phone_number.set(event_target_value(&ev))
                        />
                    </label>
                    <div class="settings-form__actions">
                        <button class="btn" type="button" on:click=move |_| editing.set(false)>
                            "Cancel"
                        </button>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </Show>
            <div class="card__row">
                <span>"Email verification"</span>
                <Show
                    when=move || user.get().is_some_and(|u| u.email_verified)
                    fallback=move || {
                        view! {
                            <button class="btn" on:click=on_resend.clone()>
                                "Resend Verification Email"
                            </button>
                        }
                    }
                >
                    <span class="badge badge--ok">"Verified"</span>
                </Show>
            </div>
            <label class="card__row">
                <span>"Marketing emails"</span>
                <input
                    type="checkbox"
                    prop:checked=move || user.get().is_some_and(|u| u.marketing_emails)
                    on:change=on_marketing_toggle.clone()
                />
            </label>
        </section>
    }
}

#[component]
fn PasswordChangeForm(
    notice: RwSignal<Option<String>>,
    error: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = expect_context::<AccountSession>();

    let old_password = RwSignal::new(String::new());
    let new_password1 = RwSignal::new(String::new());
    let new_password2 = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let found = validate_password_change(
            &old_password.get(),
            &new_password1.get(),
            &new_password2.get(),
        );
        if let Some(first) = found.into_iter().next() {
            error.set(Some(first));
            return;
        }
        error.set(None);
        let change = PasswordChange {
            old_password: old_password.get(),
            new_password1: new_password1.get(),
            new_password2: new_password2.get(),
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                match session.change_password(&change).await {
                    Ok(()) => {
                        notice.set(Some("Password changed successfully".to_owned()));
                        old_password.set(String::new());
                        new_password1.set(String::new());
                        new_password2.set(String::new());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, change, notice);
        }
    };

    view! {
        <form class="settings-form" on:submit=on_submit>
            <h3>"Change Password"</h3>
            <label class="settings-form__label">
                "Current password"
                <input
                    class="settings-form__input"
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || old_password.get()
                    on:input=move |ev| old_password.set(event_target_value(&ev))
                />
            </label>
            <label class="settings-form__label">
                "New password"
                <input
                    class="settings-form__input"
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || new_password1.get()
                    on:input=move |ev| new_password1.set(event_target_value(&ev))
                />
            </label>
            <label class="settings-form__label">
                "Confirm new password"
                <input
                    class="settings-form__input"
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || new_password2.get()
                    on:input=move |ev| new_password2.set(event_target_value(&ev))
                />
            </label>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Changing..." } else { "Change Password" }}
            </button>
        </form>
    }
}

#[component]
fn EmailChangeForm(
    notice: RwSignal<Option<String>>,
    error: RwSignal<Option<String>>,
) -> impl IntoView {
    let session = expect_context::<AccountSession>();

    let email = RwSignal::new(String::new());
    let current_password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let found = validate_email_change(&email_value, &current_password.get());
        if let Some(first) = found.into_iter().next() {
            error.set(Some(first));
            return;
        }
        error.set(None);
        let change = EmailChange {
            email: email_value,
            current_password: current_password.get(),
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                // The core re-fetches after this, so verification flags and
                // the displayed address come back server-confirmed.
                match session.change_email(&change).await {
                    Ok(()) => {
                        notice.set(Some("Email changed successfully".to_owned()));
                        email.set(String::new());
                        current_password.set(String::new());
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, change, notice);
        }
    };

    view! {
        <form class="settings-form" on:submit=on_submit>
            <h3>"Change Email"</h3>
            <label class="settings-form__label">
                "New email address"
                <input
                    class="settings-form__input"
                    type="email"
                    autocomplete="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label class="settings-form__label">
                "Current password"
                <input
                    class="settings-form__input"
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || current_password.get()
                    on:input=move |ev| current_password.set(event_target_value(&ev))
                />
            </label>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Changing..." } else { "Change Email" }}
            </button>
        </form>
    }
}

#[component]
fn DeleteAccountForm(error: RwSignal<Option<String>>) -> impl IntoView {
    let session = expect_context::<AccountSession>();
    let navigate = use_navigate();

    let password = RwSignal::new(String::new());
    let acknowledged = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() || !acknowledged.get_untracked() {
            return;
        }
        if password.get_untracked().is_empty() {
            error.set(Some("Password is required".to_owned()));
            return;
        }
        error.set(None);
        busy.set(true);
        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match session.delete_account(&password.get_untracked()).await {
                    Ok(()) => navigate("/", NavigateOptions::default()),
                    Err(err) => {
                        error.set(Some(err.to_string()));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &navigate);
        }
    };

    view! {
        <section class="card card--danger">
            <h2>"Delete Account"</h2>
            <p>"This permanently removes your account and all associated data."</p>
            <form class="settings-form" on:submit=on_submit>
                <label class="settings-form__label">
                    "Confirm with your password"
                    <input
                        class="settings-form__input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <label class="settings-form__check">
                    <input
                        type="checkbox"
                        prop:checked=move || acknowledged.get()
                        on:change=move |ev| acknowledged.set(event_target_checked(&ev))
                    />
                    "I understand this cannot be undone"
                </label>
                <button
                    class="btn btn--danger"
                    type="submit"
                    disabled=move || busy.get() || !acknowledged.get()
                >
                    {move || if busy.get() { "Deleting..." } else { "Delete Account" }}
                </button>
            </form>
        </section>
    }
}
