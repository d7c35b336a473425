//! Home Page

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home">
            <header class="hero">
                <h1>"Postara"</h1>
                <p class="tagline">"Upload once. Caption with AI. Share everywhere."</p>
                <div class="cta">
                    <a href="/tool" class="btn btn-primary">"Open the Tool"</a>
                    <a href="/pricing" class="btn">"View Plans"</a>
                </div>
            </header>

            <section class="features">
                <div class="feature">
                    <h3>"✍️ AI Captions"</h3>
                    <p>"Platform-aware captions and hashtags, generated in seconds."</p>
                </div>
                <div class="feature">
                    <h3>"📤 One Upload"</h3>
                    <p>"Your media gets a public link you can share anywhere."</p>
                </div>
                <div class="feature">
                    <h3>"🌐 Every Network"</h3>
                    <p>"Pre-built share intents for X, Facebook, WhatsApp, and more."</p>
                </div>
            </section>
        </div>
    }
}
