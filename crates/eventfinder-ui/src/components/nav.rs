use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::toast::use_toasts;

#[component]
pub fn Nav() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    let onLogout = move |_| {
        auth.logout();
        toasts.info("You have been signed out.");
    };

    view! {
        <nav class="nav-bar">
            <a href="/" class="nav-brand">
                <div class="brand-icon">"E"</div>
                <span class="brand-text">"Event Finder"</span>
            </a>
            <ul class="nav-links">
                <li class="nav-item">
                    <a href="/">"Home"</a>
                </li>
                <li class="nav-item">
                    <a href="/events">"Events"</a>
                </li>
                <Show when=move || auth.is_authenticated()>
                    <li class="nav-item">
                        <a href="/my-events">"My Events"</a>
                    </li>
                </Show>
            </ul>
            <div class="nav-session">
                <Show
                    when=move || auth.is_authenticated()
                    fallback=move || {
                        view! {
                            <a href="/login" class="btn btn-ghost btn-sm">
                                "Login"
                            </a>
                            <a href="/register" class="btn btn-primary btn-sm">
                                "Register"
                            </a>
                        }
                    }
                >
                    <span class="nav-user">
                        {move || auth.user().map(|u| u.display_name()).unwrap_or_default()}
                    </span>
                    <button class="btn btn-ghost btn-sm" on:click=onLogout>
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
