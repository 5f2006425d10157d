use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::User;

/// Lifecycle status of an event. Computed by the server, never derived from dates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Upcoming,
        EventStatus::Ongoing,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Ongoing => "Ongoing",
            EventStatus::Completed => "Completed",
            EventStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for EventStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Event as served by `events/` and `events/{id}/`.
///
/// `start_time`/`end_time` are accepted as aliases of `start_date`/`end_date`
/// for payloads from the flat event endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(alias = "start_time")]
    pub start_date: DateTime<Utc>,
    #[serde(alias = "end_time")]
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub organizer: Option<User>,
    #[serde(default)]
    pub category: Option<u64>,
    #[serde(default)]
    pub category_name: Option<String>,
    /// Server-computed; a payload without it is rejected.
    pub status: EventStatus,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub max_attendees: Option<u32>,
    #[serde(default)]
    pub attendees_count: u32,
}

impl Event {
    /// Remaining capacity, or `None` when the event has no attendee cap.
    pub fn spots_left(&self) -> Option<u32> {
        self.max_attendees
            .map(|max| max.saturating_sub(self.attendees_count))
    }

    pub fn is_full(&self) -> bool {
        self.spots_left() == Some(0)
    }

    pub fn accepts_registration(&self) -> bool {
        self.status == EventStatus::Upcoming && !self.is_full()
    }
}

/// Writable event fields for `POST events/` and `PUT events/{id}/`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EventInput {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Registered,
    Attended,
    Cancelled,
}

impl AttendanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Registered => "Registered",
            AttendanceStatus::Attended => "Attended",
            AttendanceStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Attendance {
    pub id: u64,
    pub event: Event,
    pub user: User,
    pub status: AttendanceStatus,
    pub registered_at: DateTime<Utc>,
}

/// Body of `PATCH attendances/{id}/`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AttendanceStatusUpdate {
    pub status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_json() -> serde_json::Value {
        json!({
            "id": 7,
            "title": "Jazz Night",
            "description": "Live jazz",
            "location": "Blue Room",
            "start_date": "2025-03-05T18:30:00Z",
            "end_date": "2025-03-05T22:00:00Z",
            "organizer": { "id": 2, "username": "host" },
            "category": 3,
            "category_name": "Music",
            "status": "upcoming",
            "is_featured": true,
            "max_attendees": 10,
            "attendees_count": 10
        })
    }

    #[test]
    fn parses_status_strings() {
        assert_eq!("ongoing".parse::<EventStatus>(), Ok(EventStatus::Ongoing));
        assert!("Ongoing".parse::<EventStatus>().is_err());
        assert_eq!(EventStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn decodes_full_event() {
        let event: Event = serde_json::from_value(event_json()).unwrap();
        assert_eq!(event.category_name.as_deref(), Some("Music"));
        assert_eq!(event.organizer.unwrap().username, "host");
        assert_eq!(event.status, EventStatus::Upcoming);
    }

    #[test]
    fn accepts_flat_time_fields() {
        let event: Event = serde_json::from_value(json!({
            "id": 1,
            "title": "Meetup",
            "description": "",
            "location": "Hall",
            "start_time": "2025-01-01T10:00:00Z",
            "end_time": "2025-01-01T12:00:00Z",
            "created_at": "2024-12-01T09:00:00Z",
            "status": "completed"
        }))
        .unwrap();
        assert_eq!(event.start_date.to_rfc3339(), "2025-01-01T10:00:00+00:00");
        assert_eq!(event.attendees_count, 0);
        assert_eq!(event.max_attendees, None);
        assert_eq!(event.status, EventStatus::Completed);
    }

    #[test]
    fn rejects_event_without_status() {
        let result = serde_json::from_value::<Event>(json!({
            "id": 1,
            "title": "Past",
            "start_time": "2020-01-01T10:00:00Z",
            "end_time": "2020-01-01T12:00:00Z"
        }));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("status"), "{err}");
    }

    #[test]
    fn full_event_rejects_registration() {
        let event: Event = serde_json::from_value(event_json()).unwrap();
        assert_eq!(event.spots_left(), Some(0));
        assert!(event.is_full());
        assert!(!event.accepts_registration());
    }

    #[test]
    fn uncapped_event_is_never_full() {
        let mut event: Event = serde_json::from_value(event_json()).unwrap();
        event.max_attendees = None;
        assert_eq!(event.spots_left(), None);
        assert!(event.accepts_registration());

        event.status = EventStatus::Completed;
        assert!(!event.accepts_registration());
    }

    #[test]
    fn event_input_omits_unset_fields() {
        let input = EventInput {
            title: "t".into(),
            description: "d".into(),
            location: "l".into(),
            start_date: "2025-01-01T10:00:00Z".parse().unwrap(),
            end_date: "2025-01-01T11:00:00Z".parse().unwrap(),
            category: None,
            organizer_id: None,
            status: None,
            is_featured: false,
            max_attendees: None,
        };
        let value = serde_json::to_value(&input).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("category"));
        assert!(!object.contains_key("max_attendees"));
        assert_eq!(object["is_featured"], json!(false));
    }

    #[test]
    fn attendance_status_update_body() {
        let body = AttendanceStatusUpdate {
            status: AttendanceStatus::Cancelled,
        };
        assert_eq!(serde_json::to_value(body).unwrap(), json!({ "status": "cancelled" }));
    }
}
