//! Shared route-guard helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected pages apply identical redirect behavior for signed-out
//! visitors, and the auth pages the inverse for signed-in ones. Redirects
//! only fire once the slot has resolved; `Unknown` renders a spinner
//! instead of bouncing the user while the initial fetch is in flight.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::session::AccountSession;
use crate::session::state::UserSlot;

/// Whether a protected page should bounce this visitor to sign-in.
pub fn needs_sign_in(slot: &UserSlot) -> bool {
    matches!(slot, UserSlot::Absent)
}

/// Whether an auth page (sign-in/sign-up) should forward to the dashboard.
pub fn already_signed_in(slot: &UserSlot) -> bool {
    slot.is_present()
}

/// Redirect to `/signin` whenever the session resolves with no user.
pub fn install_unauth_redirect<F>(session: &AccountSession, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let cache = session.cache().clone();
    Effect::new(move || {
        if needs_sign_in(&cache.read()) {
            navigate("/signin", NavigateOptions::default());
        }
    });
}

/// Redirect to `/dashboard` whenever a signed-in user lands on an auth page.
pub fn install_auth_redirect<F>(session: &AccountSession, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let cache = session.cache().clone();
    Effect::new(move || {
        if already_signed_in(&cache.read()) {
            navigate("/dashboard", NavigateOptions::default());
        }
    });
}
