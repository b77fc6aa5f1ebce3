//! Dashboard: the authenticated landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! First consumer of the session cache after sign-in; shows account
//! essentials and owns the manual sign-out control.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::guard::install_unauth_redirect;
use crate::components::spinner::Spinner;
use crate::session::AccountSession;
use crate::session::state::PendingOp;

fn account_status_label(email_verified: bool) -> &'static str {
    if email_verified {
        "Verified"
    } else {
        "Verification Pending"
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<AccountSession>();
    let navigate = use_navigate();

    install_unauth_redirect(&session, navigate.clone());

    let cache = session.cache().clone();
    let user = Signal::derive(move || cache.read().user().cloned());

    let sign_out_error = RwSignal::new(None::<String>);
    let signing_out = Signal::derive({
        let session = session.clone();
        move || session.pending() == PendingOp::LoggingOut
    });

    let session_out = session.clone();
    let navigate_out = navigate.clone();
    let on_sign_out = move |_| {
        if session_out.pending() != PendingOp::None {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let session = session_out.clone();
            let navigate = navigate_out.clone();
            leptos::task::spawn_local(async move {
                match session.logout().await {
                    Ok(()) => navigate("/signin", NavigateOptions::default()),
                    Err(err) => sign_out_error.set(Some(format!("Sign out failed: {err}"))),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session_out, &navigate_out);
        }
    };

    let navigate_settings = navigate.clone();
    let on_settings = move |_| navigate_settings("/settings", NavigateOptions::default());

    view! {
        <Show
            when=move || user.get().is_some()
            fallback=move || view! { <main class="page"><Spinner/></main> }
        >
            <main class="page">
                <header class="page__header">
                    <h1>"Dashboard"</h1>
                    <button
                        class="btn btn--danger"
                        on:click=on_sign_out.clone()
                        disabled=move || signing_out.get()
                    >
                        {move || if signing_out.get() { "Signing Out..." } else { "Sign Out" }}
                    </button>
                </header>
                <Show when=move || sign_out_error.get().is_some()>
                    <p class="page__error" role="alert">{move || sign_out_error.get().unwrap_or_default()}</p>
                </Show>
                <section class="card">
                    <h2>
                        "Welcome, "
                        {move || user.get().map(|u| u.display_name().to_owned()).unwrap_or_default()}
                        "!"
                    </h2>
                    <dl class="card__facts">
                        <div>
                            <dt>"Account Email"</dt>
                            <dd>{move || user.get().map(|u| u.email).unwrap_or_default()}</dd>
                        </div>
                        <div>
                            <dt>"Account Status"</dt>
                            <dd>
                                {move || {
                                    user.get()
                                        .map(|u| account_status_label(u.email_verified))
                                        .unwrap_or_default()
                                }}
                            </dd>
                        </div>
                    </dl>
                </section>
                <section class="card card--actions">
                    <button class="card__tile" on:click=on_settings.clone()>
                        <h3>"Account Settings"</h3>
                        <p>"Update your profile and preferences"</p>
                    </button>
                </section>
            </main>
        </Show>
    }
}
