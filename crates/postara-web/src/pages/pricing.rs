//! Pricing Page

use leptos::prelude::*;

#[component]
pub fn PricingPage() -> impl IntoView {
    view! {
        <div class="pricing">
            <h1>"Pricing"</h1>
            <p class="subtitle">"Simple plans for creators"</p>

            <div class="plans">
                <div class="plan">
                    <h2>"Free"</h2>
                    <div class="price">"$0"<span>"/month"</span></div>
                    <ul>
                        <li>"Caption generation"</li>
                        <li>"Link sharing"</li>
                    </ul>
                    <a href="/tool" class="btn">"Get Started"</a>
                </div>

                <div class="plan featured">
                    <span class="badge">"Popular"</span>
                    <h2>"Pro"</h2>
                    <div class="price">"$12"<span>"/month"</span></div>
                    <ul>
                        <li>"Unlimited captions"</li>
                        <li>"Larger uploads"</li>
                        <li>"Multi-network posting"</li>
                    </ul>
                    // Server creates the session and 303-redirects to Stripe
                    <a href="/api/checkout?plan=pro" class="btn btn-primary" rel="external">
                        "Subscribe"
                    </a>
                </div>
            </div>
        </div>
    }
}
