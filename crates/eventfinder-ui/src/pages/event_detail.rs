use eventfinder_types::{Event, EventStatus};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::auth::use_auth;
use crate::components::status::{EmptyState, ErrorNotice, Spinner};
use crate::format::{attendee_label, long_date, spots_left_label, status_notice};

const REGISTERED: &str = "You have successfully registered for this event!";
const REGISTER_FAILED: &str = "Failed to register for this event. Please try again.";

#[derive(Clone, Debug)]
enum Detail {
    Loading,
    Missing,
    Failed(String),
    Ready(Event),
}

/// Result of the last registration attempt.
#[derive(Clone, Debug)]
enum Feedback {
    Success(&'static str),
    Failure(String),
}

fn status_class(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Upcoming => "badge badge-upcoming",
        EventStatus::Ongoing => "badge badge-ongoing",
        EventStatus::Completed => "badge badge-completed",
        EventStatus::Cancelled => "badge badge-cancelled",
    }
}

#[component]
pub fn EventDetailPage() -> impl IntoView {
    let auth = use_auth();
    let params = use_params_map();

    let eventId = Memo::new(move |_| params.read().get("id").and_then(|id| id.parse::<u64>().ok()));

    #[allow(unused_variables)]
    let (detail, setDetail) = signal(Detail::Loading);
    #[allow(unused_variables)]
    let (registering, setRegistering) = signal(false);
    #[allow(unused_variables)]
    let (feedback, setFeedback) = signal(Option::<Feedback>::None);
    // Bumped after a successful registration so the event is fetched again.
    #[allow(unused_variables)]
    let version = RwSignal::new(0u32);

    #[cfg(feature = "hydrate")]
    if let Some(client) = auth.client() {
        use eventfinder_client::ErrorKind;
        use wasm_bindgen_futures::spawn_local;

        Effect::new(move |_| {
            version.track();
            let Some(id) = eventId.get() else {
                setDetail.set(Detail::Missing);
                return;
            };
            let client = client.clone();
            spawn_local(async move {
                let next = match client.get_event(id).await {
                    Ok(response) => Detail::Ready(response.into_data()),
                    Err(e) if e.kind() == ErrorKind::NotFound => Detail::Missing,
                    Err(e) => {
                        leptos::logging::warn!("event {id}: {e}");
                        Detail::Failed("Failed to load event details. Please try again later.".into())
                    }
                };
                setDetail.set(next);
            });
        });
    }

    let onRegister = move |_| {
        if !auth.is_authenticated() {
            auth.redirect_to(eventfinder_client::LOGIN_PATH);
            return;
        }
        let Some(id) = eventId.get_untracked() else {
            return;
        };
        if registering.get_untracked() {
            return;
        }

        #[cfg(feature = "hydrate")]
        if let Some(client) = auth.client() {
            use wasm_bindgen_futures::spawn_local;

            setRegistering.set(true);
            setFeedback.set(None);
            spawn_local(async move {
                match client.register_for_event(id).await {
                    Ok(_) => {
                        setFeedback.set(Some(Feedback::Success(REGISTERED)));
                        version.update(|v| *v += 1);
                    }
                    Err(e) => {
                        leptos::logging::warn!("register for event {id}: {e}");
                        setFeedback.set(Some(Feedback::Failure(e.message_or(REGISTER_FAILED))));
                    }
                }
                setRegistering.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    };

    view! {
        <a href="/events" class="back-link">"\u{2190} Back to events"</a>
        {move || {
            let onRegister = onRegister.clone();
            match detail.get() {
                Detail::Loading => view! { <Spinner label="Loading event..." /> }.into_any(),
                Detail::Missing => {
                    view! {
                        <EmptyState title="Event not found" hint="It may have been removed.">
                            <a href="/events" class="btn btn-primary">"Browse Events"</a>
                        </EmptyState>
                    }
                        .into_any()
                }
                Detail::Failed(message) => view! { <ErrorNotice message=message /> }.into_any(),
                Detail::Ready(event) => {
                    let notice = status_notice(event.status);
                    let canRegister = event.accepts_registration();
                    let isFull = event.is_full();
                    let attendance = format!(
                        "{}{}",
                        attendee_label(event.attendees_count),
                        spots_left_label(&event).unwrap_or_default(),
                    );
                    let organizer = event
                        .organizer
                        .as_ref()
                        .map(|u| u.username.clone())
                        .unwrap_or_else(|| "Unknown".to_string());

                    view! {
                        <article class="event-detail">
                            {event
                                .image
                                .clone()
                                .map(|src| view! { <img class="event-hero" src=src alt=event.title.clone() /> })}
                            <header class="event-detail-header">
                                <h1>{event.title.clone()}</h1>
                                <div class="event-badges">
                                    <span class=status_class(event.status)>{event.status.label()}</span>
                                    {event
                                        .category_name
                                        .clone()
                                        .map(|name| view! { <span class="category-pill">{name}</span> })}
                                </div>
                            </header>

                            <div class="event-detail-grid">
                                <section class="event-description">
                                    <h2>"About this event"</h2>
                                    {event
                                        .description
                                        .split('\n')
                                        .map(|line| view! { <p>{line.to_string()}</p> })
                                        .collect_view()}
                                </section>

                                <aside class="card event-facts">
                                    <dl>
                                        <dt>"Starts"</dt>
                                        <dd>{long_date(&event.start_date)}</dd>
                                        <dt>"Ends"</dt>
                                        <dd>{long_date(&event.end_date)}</dd>
                                        <dt>"Location"</dt>
                                        <dd>{event.location.clone()}</dd>
                                        <dt>"Organizer"</dt>
                                        <dd>{organizer}</dd>
                                        <dt>"Attendance"</dt>
                                        <dd>{attendance}</dd>
                                    </dl>

                                    {match notice {
                                        Some(text) => view! { <p class="notice">{text}</p> }.into_any(),
                                        None => {
                                            view! {
                                                <button
                                                    class="btn btn-primary btn-block"
                                                    disabled=move || registering.get() || !canRegister
                                                    on:click=onRegister
                                                >
                                                    {move || {
                                                        if registering.get() {
                                                            "Registering..."
                                                        } else if isFull {
                                                            "Event Full"
                                                        } else {
                                                            "Register for Event"
                                                        }
                                                    }}
                                                </button>
                                            }
                                                .into_any()
                                        }
                                    }}

                                    {move || feedback.get().map(|f| match f {
                                        Feedback::Success(text) => {
                                            view! { <p class="notice notice-success">{text}</p> }.into_any()
                                        }
                                        Feedback::Failure(text) => {
                                            view! { <p class="notice notice-error">{text}</p> }.into_any()
                                        }
                                    })}
                                </aside>
                            </div>
                        </article>
                    }
                        .into_any()
                }
            }
        }}
    }
}
