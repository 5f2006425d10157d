use chrono::{DateTime, Utc};
use eventfinder_types::{Event, EventStatus};

/// `Mar 05, 2025 - 6:30 PM`
pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%b %d, %Y - %-I:%M %p").to_string()
}

/// `Wednesday, March 5, 2025 - 6:30 PM`
pub fn long_date(date: &DateTime<Utc>) -> String {
    date.format("%A, %B %-d, %Y - %-I:%M %p").to_string()
}

pub fn attendee_label(count: u32) -> String {
    if count == 1 {
        "1 person attending".to_string()
    } else {
        format!("{count} people attending")
    }
}

pub fn spots_left_label(event: &Event) -> Option<String> {
    event.spots_left().map(|left| format!(" ({left} spots left)"))
}

/// Notice shown instead of the register button.
pub fn status_notice(status: EventStatus) -> Option<&'static str> {
    match status {
        EventStatus::Upcoming => None,
        EventStatus::Ongoing => Some("This event is currently ongoing."),
        EventStatus::Completed => Some("This event has already taken place."),
        EventStatus::Cancelled => Some("This event has been cancelled."),
    }
}
