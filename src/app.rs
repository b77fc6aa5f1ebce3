//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::api::HttpDirectory;
use crate::pages::{
    dashboard::DashboardPage, home::HomePage, settings::SettingsPage, sign_in::SignInPage,
    sign_up::SignUpPage, verify_email::VerifyEmailPage,
};
use crate::session::AccountSession;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the single `AccountSession`, provides it through context, kicks off
/// the initial session resolution, and installs the idle watchdog.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = AccountSession::new(HttpDirectory);
    provide_context(session.clone());

    #[cfg(feature = "hydrate")]
    {
        let boot = session.clone();
        leptos::task::spawn_local(async move {
            boot.resolve_on_load(crate::util::cookie::browser_has_session_hint())
                .await;
        });
        crate::session::idle::install_idle_watchdog(session);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/account-client.css"/>
        <Title text="Account"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("signin") view=SignInPage/>
                <Route path=StaticSegment("signup") view=SignUpPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("settings") view=SettingsPage/>
                <Route path=StaticSegment("verify-email") view=VerifyEmailPage/>
            </Routes>
        </Router>
    }
}
