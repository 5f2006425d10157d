use eventfinder_types::{Category, Event, EventFilter};
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::event_card::EventCard;
use crate::components::status::{EmptyState, ErrorNotice, Spinner};

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    #[allow(unused_variables)]
    let (featured, setFeatured) = signal(Option::<Result<Vec<Event>, String>>::None);
    #[allow(unused_variables)]
    let (categories, setCategories) = signal(Option::<Result<Vec<Category>, String>>::None);

    #[cfg(feature = "hydrate")]
    if let Some(client) = auth.client() {
        use eventfinder_types::EventQuery;
        use wasm_bindgen_futures::spawn_local;

        const FEATURED_LIMIT: u32 = 6;

        let categoryClient = client.clone();
        spawn_local(async move {
            let result = client
                .list_events(&EventQuery::featured(FEATURED_LIMIT))
                .await
                .map(|r| r.into_data())
                .map_err(|e| {
                    leptos::logging::warn!("featured events: {e}");
                    "Failed to load featured events.".to_string()
                });
            setFeatured.set(Some(result));
        });
        spawn_local(async move {
            let result = categoryClient
                .list_categories()
                .await
                .map(|r| r.into_data())
                .map_err(|e| {
                    leptos::logging::warn!("categories: {e}");
                    "Failed to load categories.".to_string()
                });
            setCategories.set(Some(result));
        });
    }

    view! {
        <section class="hero">
            <h1>"Discover events near you"</h1>
            <p class="subtitle">"Concerts, workshops, meetups and more. Find something worth showing up for."</p>
            <div class="hero-actions">
                <a href="/events" class="btn btn-primary">"Browse Events"</a>
                <Show when=move || !auth.is_authenticated()>
                    <a href="/register" class="btn btn-ghost">"Create an Account"</a>
                </Show>
            </div>
        </section>

        <section class="section">
            <div class="section-header">
                <h2>"Featured Events"</h2>
                <a href="/events" class="section-link">"View all"</a>
            </div>
            {move || match featured.get() {
                None => view! { <Spinner label="Loading featured events..." /> }.into_any(),
                Some(Err(e)) => view! { <ErrorNotice message=e /> }.into_any(),
                Some(Ok(events)) if events.is_empty() => {
                    view! {
                        <EmptyState title="No featured events" hint="Check back soon for highlighted events." />
                    }
                        .into_any()
                }
                Some(Ok(events)) => {
                    view! {
                        <div class="event-grid">
                            {events
                                .into_iter()
                                .map(|event| view! { <EventCard event=event /> })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>

        <section class="section">
            <div class="section-header">
                <h2>"Browse by Category"</h2>
            </div>
            {move || match categories.get() {
                None => view! { <Spinner label="Loading categories..." /> }.into_any(),
                Some(Err(e)) => view! { <ErrorNotice message=e /> }.into_any(),
                Some(Ok(list)) if list.is_empty() => {
                    view! { <EmptyState title="No categories yet" /> }.into_any()
                }
                Some(Ok(list)) => {
                    view! {
                        <div class="category-grid">
                            {list.into_iter().map(category_link).collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

fn category_link(category: Category) -> impl IntoView {
    let href = EventFilter::default()
        .with_category(Some(category.id))
        .page_path("/events");
    view! {
        <a href=href class="card category-card">
            <h3>{category.name}</h3>
            {category.description.map(|d| view! { <p class="muted">{d}</p> })}
        </a>
    }
}
