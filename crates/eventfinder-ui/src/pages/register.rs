use eventfinder_types::Registration;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::auth::use_auth;

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let firstName = RwSignal::new(String::new());
    let lastName = RwSignal::new(String::new());

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if auth.is_loading() {
            return;
        }
        let registration = Registration {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            first_name: optional(firstName.get_untracked()),
            last_name: optional(lastName.get_untracked()),
        };

        #[cfg(feature = "hydrate")]
        if let Some(store) = auth.store() {
            wasm_bindgen_futures::spawn_local(async move {
                let _ = store.register(&registration).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = registration;
        }
    };

    let field = move |id: &'static str, label: &'static str, kind: &'static str, value: RwSignal<String>, required: bool| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    type=kind
                    id=id
                    name=id
                    required=required
                    prop:value=value
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-header">
                    <h1>"Create an account"</h1>
                    <p>"Join to register for events near you"</p>
                </div>

                {move || auth.error().map(|e| view! { <div class="auth-error">{e}</div> })}

                <form on:submit=onSubmit>
                    {field("username", "Username", "text", username, true)}
                    {field("email", "Email", "email", email, true)}
                    {field("password", "Password", "password", password, true)}
                    <div class="form-row">
                        {field("first_name", "First name", "text", firstName, false)}
                        {field("last_name", "Last name", "text", lastName, false)}
                    </div>
                    <button type="submit" class="btn btn-primary btn-block" disabled=move || auth.is_loading()>
                        {move || if auth.is_loading() { "Creating account..." } else { "Create Account" }}
                    </button>
                </form>

                <p class="auth-switch">
                    "Already registered? " <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
