//! Public landing page.

use leptos::prelude::*;

use crate::session::AccountSession;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<AccountSession>();

    let cache = session.cache().clone();
    let signed_in = Signal::derive(move || cache.read().is_present());

    view! {
        <main class="landing">
            <section class="landing__hero">
                <h1>"Manage your account"</h1>
                <p>"Sign in to view your dashboard, update your profile, and manage your preferences."</p>
                <div class="landing__actions">
                    <Show
                        when=move || signed_in.get()
                        fallback=|| {
                            view! {
                                <a class="btn btn--primary" href="/signin">"Sign In"</a>
                                <a class="btn" href="/signup">"Create Account"</a>
                            }
                        }
                    >
                        <a class="btn btn--primary" href="/dashboard">"Go to Dashboard"</a>
                    </Show>
                </div>
            </section>
        </main>
    }
}
