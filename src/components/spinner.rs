//! Loading indicator shown while session state is unresolved.

use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(default = "Loading...")] label: &'static str) -> impl IntoView {
    view! {
        <div class="spinner" role="status" aria-live="polite">
            <span class="spinner__dot" aria-hidden="true"></span>
            <span class="spinner__label">{label}</span>
        </div>
    }
}
