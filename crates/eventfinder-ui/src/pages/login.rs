use eventfinder_types::LoginCredentials;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::auth::use_auth;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if auth.is_loading() {
            return;
        }
        let credentials = LoginCredentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };

        #[cfg(feature = "hydrate")]
        if let Some(store) = auth.store() {
            wasm_bindgen_futures::spawn_local(async move {
                // Outcome is published through the session signal.
                let _ = store.login(&credentials).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-header">
                    <h1>"Welcome back"</h1>
                    <p>"Sign in to register for events"</p>
                </div>

                {move || auth.error().map(|e| view! { <div class="auth-error">{e}</div> })}

                <form on:submit=onSubmit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            name="username"
                            autocomplete="username"
                            required
                            prop:value=username
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            required
                            prop:value=password
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn btn-primary btn-block" disabled=move || auth.is_loading()>
                        {move || if auth.is_loading() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                <p class="auth-switch">
                    "No account yet? " <a href="/register">"Create one"</a>
                </p>
            </div>
        </div>
    }
}
