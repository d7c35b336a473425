//! Tool Page
//!
//! The caption workbench: describe or upload media, generate caption
//! options, pick one, and share it.

use leptos::prelude::*;

use crate::api;
use crate::components::ShareButtons;

#[component]
pub fn ToolPage() -> impl IntoView {
    let (text, set_text) = signal(String::new());
    let (tone, set_tone) = signal("neutral".to_string());
    let (platform, set_platform) = signal("instagram".to_string());
    let (hashtags, set_hashtags) = signal(String::new());

    let (captions, set_captions) = signal(Vec::<String>::new());
    let (tags, set_tags) = signal(Vec::<String>::new());
    let (chosen, set_chosen) = signal(String::new());
    let (media_url, set_media_url) = signal(String::new());

    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(String::new());

    let (post_platforms, set_post_platforms) = signal("instagram, twitter".to_string());
    let (post_status, set_post_status) = signal(String::new());

    let generate = move |_| {
        let input = text.get();
        if input.trim().is_empty() || loading.get() {
            return;
        }
        set_loading.set(true);
        set_error.set(String::new());

        let tone = tone.get();
        let platform = platform.get();
        let hashtags = hashtags.get();
        leptos::task::spawn_local(async move {
            match api::generate_captions(&input, &tone, &platform, &hashtags).await {
                Ok(result) => {
                    set_captions.set(result.captions);
                    set_tags.set(result.hashtags);
                }
                Err(e) => set_error.set(e),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="tool">
            <h1>"Caption Tool"</h1>

            <section class="generate">
                <textarea
                    placeholder="Describe your post (e.g. sunset surf session at the pier)"
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                />

                <div class="options">
                    <select on:change=move |ev| set_tone.set(event_target_value(&ev))>
                        <option value="neutral">"Neutral"</option>
                        <option value="funny">"Funny"</option>
                        <option value="casual">"Casual"</option>
                        <option value="professional">"Professional"</option>
                    </select>
                    <select on:change=move |ev| set_platform.set(event_target_value(&ev))>
                        <option value="instagram">"Instagram"</option>
                        <option value="x">"X (Twitter)"</option>
                        <option value="tiktok">"TikTok"</option>
                        <option value="linkedin">"LinkedIn"</option>
                    </select>
                    <input
                        type="text"
                        placeholder="#hashtags (optional)"
                        prop:value=move || hashtags.get()
                        on:input=move |ev| set_hashtags.set(event_target_value(&ev))
                    />
                </div>

                <button class="btn btn-primary" on:click=generate disabled=move || loading.get()>
                    {move || if loading.get() { "Generating..." } else { "Generate captions" }}
                </button>

                <Show when=move || !error.get().is_empty()>
                    <p class="error">{move || error.get()}</p>
                </Show>
            </section>

            <section class="results">
                <For
                    each=move || captions.get()
                    key=|caption| caption.clone()
                    children=move |caption: String| {
                        let pick = caption.clone();
                        view! {
                            <button class="caption-option" on:click=move |_| set_chosen.set(pick.clone())>
                                {caption.clone()}
                            </button>
                        }
                    }
                />
                <Show when=move || !tags.get().is_empty()>
                    <p class="hashtags">
                        {move || tags.get().iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" ")}
                    </p>
                </Show>
            </section>

            <section class="upload">
                <h3>"Media"</h3>
                // Plain multipart post; the server forwards to hosted storage
                <form action="/api/upload" method="post" enctype="multipart/form-data" target="_blank">
                    <input type="file" name="file" />
                    <button type="submit" class="btn">"Upload"</button>
                </form>
                <input
                    type="text"
                    placeholder="Paste the public URL from the upload result"
                    prop:value=move || media_url.get()
                    on:input=move |ev| set_media_url.set(event_target_value(&ev))
                />
            </section>

            <section class="publish">
                <h3>"Publish"</h3>
                <input
                    type="text"
                    placeholder="Platforms, comma-separated (e.g. instagram, twitter)"
                    prop:value=move || post_platforms.get()
                    on:input=move |ev| set_post_platforms.set(event_target_value(&ev))
                />
                <button
                    class="btn"
                    on:click=move |_| {
                        let caption = chosen.get();
                        if caption.is_empty() {
                            set_post_status.set("Pick a caption first.".into());
                            return;
                        }
                        let platforms: Vec<String> = post_platforms
                            .get()
                            .split(',')
                            .map(|p| p.trim().to_lowercase())
                            .filter(|p| !p.is_empty())
                            .collect();
                        let media = media_url.get();
                        leptos::task::spawn_local(async move {
                            let media = (!media.is_empty()).then_some(media.as_str());
                            match api::social_post(&caption, media, &platforms).await {
                                Ok(()) => set_post_status.set("Posted.".into()),
                                Err(e) => set_post_status.set(e),
                            }
                        });
                    }
                >
                    "Post everywhere"
                </button>
                <Show when=move || !post_status.get().is_empty()>
                    <p class="notice">{move || post_status.get()}</p>
                </Show>
            </section>

            <ShareButtons url=media_url text=chosen />
        </div>
    }
}
