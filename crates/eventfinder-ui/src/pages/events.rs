use eventfinder_types::{Category, Event, EventFilter, EventStatus};
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

use crate::auth::use_auth;
use crate::components::event_card::EventCard;
use crate::components::status::{EmptyState, ErrorNotice, Spinner};

const EVENTS_PATH: &str = "/events";
const LOAD_FAILED: &str = "Failed to load events. Please try again later.";

#[component]
pub fn EventsPage() -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    // The query string is the single source of truth for the filters.
    let filter = Memo::new(move |_| EventFilter::from_query_string(&location.search.get()));

    #[allow(unused_variables)]
    let (events, setEvents) = signal(Option::<Result<Vec<Event>, String>>::None);
    #[allow(unused_variables)]
    let (categories, setCategories) = signal(Vec::<Category>::new());

    #[cfg(feature = "hydrate")]
    if let Some(client) = auth.client() {
        use eventfinder_types::EventQuery;
        use wasm_bindgen_futures::spawn_local;

        let categoryClient = client.clone();
        spawn_local(async move {
            match categoryClient.list_categories().await {
                Ok(response) => setCategories.set(response.into_data()),
                Err(e) => leptos::logging::warn!("categories: {e}"),
            }
        });

        // Responses for filters that are no longer current are dropped.
        let generation = StoredValue::new(0u64);
        Effect::new(move |_| {
            let current = filter.get();
            let ticket = generation.get_value() + 1;
            generation.set_value(ticket);
            setEvents.set(None);

            let client = client.clone();
            spawn_local(async move {
                let result = client
                    .list_events(&EventQuery::from(&current))
                    .await
                    .map(|r| r.into_data())
                    .map_err(|e| {
                        leptos::logging::warn!("events: {e}");
                        LOAD_FAILED.to_string()
                    });
                if generation.get_value() == ticket {
                    setEvents.set(Some(result));
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = auth;

    let apply = move |next: EventFilter, replace: bool| {
        navigate(
            &next.page_path(EVENTS_PATH),
            NavigateOptions {
                replace,
                ..Default::default()
            },
        );
    };

    let onSearch = {
        let apply = apply.clone();
        move |ev: leptos::ev::Event| {
            let text = event_target_value(&ev);
            apply(filter.get_untracked().with_search(text), true);
        }
    };

    let onCategory = {
        let apply = apply.clone();
        move |ev: leptos::ev::Event| {
            let category = event_target_value(&ev).parse().ok();
            apply(filter.get_untracked().with_category(category), false);
        }
    };

    let onStatus = move |ev: leptos::ev::Event| {
        let status = event_target_value(&ev).parse::<EventStatus>().ok();
        apply(filter.get_untracked().with_status(status), false);
    };

    view! {
        <div class="page-header">
            <h1>"Events"</h1>
            <p class="subtitle">"Find something happening soon"</p>
        </div>

        <div class="filter-bar">
            <input
                type="search"
                class="filter-search"
                placeholder="Search events..."
                prop:value=move || filter.get().search.unwrap_or_default()
                on:input=onSearch
            />
            <select
                class="filter-select"
                on:change=onCategory
                prop:value=move || filter.get().category.map(|c| c.to_string()).unwrap_or_default()
            >
                <option value="">"All categories"</option>
                {move || {
                    let selected = filter.get().category;
                    categories
                        .get()
                        .into_iter()
                        .map(|c| {
                            view! {
                                <option value=c.id.to_string() selected={selected == Some(c.id)}>
                                    {c.name}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
            <select
                class="filter-select"
                on:change=onStatus
                prop:value=move || filter.get().status.map(|s| s.as_str()).unwrap_or_default()
            >
                <option value="">"Any status"</option>
                {EventStatus::ALL
                    .into_iter()
                    .map(|status| {
                        view! {
                            <option
                                value=status.as_str()
                                selected=move || filter.get().status == Some(status)
                            >
                                {status.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <Show when=move || !filter.get().is_empty()>
                <a href=EVENTS_PATH class="btn btn-ghost btn-sm">"Clear filters"</a>
            </Show>
        </div>

        {move || match events.get() {
            None => view! { <Spinner label="Loading events..." /> }.into_any(),
            Some(Err(e)) => view! { <ErrorNotice message=e /> }.into_any(),
            Some(Ok(list)) if list.is_empty() => {
                view! {
                    <EmptyState title="No events found" hint="Try adjusting your filters.">
                        <a href=EVENTS_PATH class="btn btn-primary">"Clear Filters"</a>
                    </EmptyState>
                }
                    .into_any()
            }
            Some(Ok(list)) => {
                view! {
                    <div class="event-grid">
                        {list.into_iter().map(|event| view! { <EventCard event=event /> }).collect_view()}
                    </div>
                }
                    .into_any()
            }
        }}
    }
}
