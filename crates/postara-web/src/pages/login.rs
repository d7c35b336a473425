//! Login Page (placeholder)
//!
//! No authentication layer exists for the tool; this page is presentation
//! only.

use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (notice, set_notice) = signal(String::new());

    view! {
        <div class="login">
            <h1>"Sign in"</h1>
            <div class="field">
                <label>"Email"</label>
                <input
                    type="email"
                    placeholder="you@example.com"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
            </div>
            <button
                class="btn btn-primary"
                on:click=move |_| set_notice.set("Accounts are coming soon.".into())
            >
                "Continue"
            </button>
            <Show when=move || !notice.get().is_empty()>
                <p class="notice">{move || notice.get()}</p>
            </Show>
        </div>
    }
}
