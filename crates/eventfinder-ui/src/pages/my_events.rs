use eventfinder_types::{Attendance, AttendanceStatus};
use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::status::{EmptyState, ErrorNotice, Spinner};
use crate::components::toast::use_toasts;
use crate::format::short_date;

fn status_class(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Registered => "badge badge-upcoming",
        AttendanceStatus::Attended => "badge badge-completed",
        AttendanceStatus::Cancelled => "badge badge-cancelled",
    }
}

/// Attendances of the signed-in user, newest registration first.
#[component]
pub fn MyEventsPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    #[allow(unused_variables)]
    let (attendances, setAttendances) = signal(Option::<Result<Vec<Attendance>, String>>::None);
    #[allow(unused_variables)]
    let (cancelling, setCancelling) = signal(Option::<u64>::None);
    #[allow(unused_variables)]
    let version = RwSignal::new(0u32);

    #[cfg(feature = "hydrate")]
    if let Some(client) = auth.client() {
        use wasm_bindgen_futures::spawn_local;

        Effect::new(move |_| {
            version.track();
            // Re-runs once the persisted session has been validated.
            if !auth.is_authenticated() {
                return;
            }
            let client = client.clone();
            spawn_local(async move {
                let result = client
                    .list_attendances()
                    .await
                    .map(|r| {
                        let mut list = r.into_data();
                        list.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
                        list
                    })
                    .map_err(|e| {
                        leptos::logging::warn!("attendances: {e}");
                        "Failed to load your events. Please try again later.".to_string()
                    });
                setAttendances.set(Some(result));
            });
        });
    }

    let onCancel = move |id: u64| {
        if cancelling.get_untracked().is_some() {
            return;
        }

        #[cfg(feature = "hydrate")]
        if let Some(client) = auth.client() {
            use wasm_bindgen_futures::spawn_local;

            setCancelling.set(Some(id));
            spawn_local(async move {
                match client.update_attendance_status(id, AttendanceStatus::Cancelled).await {
                    Ok(_) => {
                        toasts.success("Your registration has been cancelled.");
                        version.update(|v| *v += 1);
                    }
                    Err(e) => {
                        leptos::logging::warn!("cancel attendance {id}: {e}");
                        toasts.error(e.message_or("Failed to cancel registration. Please try again."));
                    }
                }
                setCancelling.set(None);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, toasts);
    };

    view! {
        <div class="page-header">
            <h1>"My Events"</h1>
            <p class="subtitle">"Events you have registered for"</p>
        </div>
        {move || {
            if auth.is_loading() {
                return view! { <Spinner label="Checking your session..." /> }.into_any();
            }
            if !auth.is_authenticated() {
                return view! {
                    <EmptyState title="Sign in to see your events">
                        <a href="/login" class="btn btn-primary">"Login"</a>
                    </EmptyState>
                }
                    .into_any();
            }
            match attendances.get() {
                None => view! { <Spinner label="Loading your events..." /> }.into_any(),
                Some(Err(e)) => view! { <ErrorNotice message=e /> }.into_any(),
                Some(Ok(list)) if list.is_empty() => {
                    view! {
                        <EmptyState title="No registrations yet" hint="Find an event and save your spot.">
                            <a href="/events" class="btn btn-primary">"Browse Events"</a>
                        </EmptyState>
                    }
                        .into_any()
                }
                Some(Ok(list)) => {
                    view! {
                        <ul class="attendance-list">
                            {list
                                .into_iter()
                                .map(|attendance| attendance_row(attendance, cancelling, onCancel))
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }
        }}
    }
}

fn attendance_row(
    attendance: Attendance,
    cancelling: ReadSignal<Option<u64>>,
    onCancel: impl Fn(u64) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    let id = attendance.id;
    let event = attendance.event;
    let href = format!("/events/{}", event.id);
    let canCancel = attendance.status == AttendanceStatus::Registered;

    view! {
        <li class="card attendance-row">
            <div class="attendance-info">
                <a href=href class="attendance-title">{event.title}</a>
                <span class="muted">{short_date(&event.start_date)} " \u{00B7} " {event.location}</span>
                <span class="muted">"Registered " {short_date(&attendance.registered_at)}</span>
            </div>
            <span class=status_class(attendance.status)>{attendance.status.label()}</span>
            <Show when=move || canCancel>
                <button
                    class="btn btn-ghost btn-sm"
                    disabled=move || cancelling.get() == Some(id)
                    on:click=move |_| onCancel(id)
                >
                    {move || if cancelling.get() == Some(id) { "Cancelling..." } else { "Cancel" }}
                </button>
            </Show>
        </li>
    }
}
