//! UI Components

use leptos::prelude::*;

use postara_share::{Network, ShareKind, ALL_NETWORKS};

fn open_popup(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(url, "_blank");
    }
}

/// Share buttons: one row per network, link-kind networks open the
/// share-intent URL, connect-kind networks are flagged instead.
#[component]
pub fn ShareButtons(url: ReadSignal<String>, text: ReadSignal<String>) -> impl IntoView {
    let (notice, set_notice) = signal(String::new());

    let share_one = move |network: Network| {
        let public_url = url.get();
        if public_url.is_empty() {
            set_notice.set("Upload to get a public link first.".into());
            return;
        }
        match network.share_url(&public_url, &text.get(), "Shared via Postara") {
            Some(intent) => open_popup(&intent),
            None => set_notice.set(format!(
                "{} needs account connection before posting.",
                network.label()
            )),
        }
    };

    view! {
        <div class="share">
            <div class="share-header">
                <h3>"Share"</h3>
                <span class="share-status">
                    {move || if url.get().is_empty() {
                        "Upload first to enable sharing."
                    } else {
                        "Public link ready."
                    }}
                </span>
            </div>

            <div class="share-grid">
                {ALL_NETWORKS
                    .iter()
                    .map(|&network| {
                        let is_link = network.kind() == ShareKind::Link;
                        let tag = if is_link { "link share" } else { "connect required" };
                        view! {
                            <div class="share-row">
                                <span class="share-label">{network.label()}</span>
                                <span class="share-tag">{tag}</span>
                                <button on:click=move |_| share_one(network)>
                                    {if is_link { "Share now" } else { "Connect" }}
                                </button>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <Show when=move || !notice.get().is_empty()>
                <p class="share-notice">{move || notice.get()}</p>
            </Show>
        </div>
    }
}
