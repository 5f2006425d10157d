//! The three non-data states every list and detail view can be in. Each has
//! its own markup so loading, failure and "nothing here" never look alike.

use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="loading" role="status">
            <div class="spinner"></div>
            {label}
        </div>
    }
}

#[component]
pub fn ErrorNotice(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="notice notice-error" role="alert">
            <p>{message}</p>
        </div>
    }
}

#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(into, optional)] hint: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="empty-state">
            <h3>{title}</h3>
            {hint.map(|hint| view! { <p class="muted">{hint}</p> })}
            {children.map(|children| children())}
        </div>
    }
}
