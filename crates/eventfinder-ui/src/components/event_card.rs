use eventfinder_types::Event;
use leptos::prelude::*;

use crate::format::short_date;

#[component]
pub fn EventCard(event: Event) -> impl IntoView {
    let href = format!("/events/{}", event.id);
    let startsAt = short_date(&event.start_date);

    view! {
        <div class="card event-card">
            <div class="event-card-media">
                {match event.image.clone() {
                    Some(src) => view! { <img src=src alt=event.title.clone() /> }.into_any(),
                    None => view! { <div class="no-image">"No image"</div> }.into_any(),
                }}
                <span class="status-pill">{event.status.as_str()}</span>
            </div>
            <div class="event-card-body">
                <div class="event-card-title">
                    <h3>{event.title.clone()}</h3>
                    {event
                        .category_name
                        .clone()
                        .map(|name| view! { <span class="category-pill">{name}</span> })}
                </div>
                <p class="event-card-description">{event.description.clone()}</p>
                <div class="event-meta">
                    <span class="meta-icon">"\u{1F4CD}"</span>
                    <span>{event.location.clone()}</span>
                </div>
                <div class="event-meta">
                    <span class="meta-icon">"\u{1F4C5}"</span>
                    <span>{startsAt}</span>
                </div>
                <a href=href class="btn btn-primary btn-block">
                    "View Details"
                </a>
            </div>
        </div>
    }
}
