use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::event::EventStatus;

/// Filters of the events page. Round-trips through the page's query string so
/// filtered views can be shared and bookmarked.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventFilter {
    pub category: Option<u64>,
    pub status: Option<EventStatus>,
    pub search: Option<String>,
}

impl EventFilter {
    /// Reads `category`, `status` and `search` from a query string (leading
    /// `?` optional). Empty or unparsable values are treated as unset; the
    /// first occurrence of a repeated key wins.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut filter = EventFilter::default();
        let (mut seenCategory, mut seenStatus, mut seenSearch) = (false, false, false);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "category" if !seenCategory => {
                    seenCategory = true;
                    filter.category = value.parse().ok();
                }
                "status" if !seenStatus => {
                    seenStatus = true;
                    filter.status = value.parse().ok();
                }
                "search" if !seenSearch => {
                    seenSearch = true;
                    filter.search = Some(value.into_owned()).filter(|s| !s.is_empty());
                }
                _ => {}
            }
        }

        filter
    }

    /// Canonical query string without the leading `?`; empty when no filter is set.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = self.category {
            serializer.append_pair("category", &category.to_string());
        }
        if let Some(status) = self.status {
            serializer.append_pair("status", status.as_str());
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            serializer.append_pair("search", search);
        }
        serializer.finish()
    }

    /// Page path for this filter, e.g. `/events?category=3`.
    pub fn page_path(&self, base: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{query}")
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.status.is_none()
            && self.search.as_deref().map_or(true, str::is_empty)
    }

    pub fn with_category(mut self, category: Option<u64>) -> Self {
        self.category = category;
        self
    }

    pub fn with_status(mut self, status: Option<EventStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.is_empty() { None } else { Some(search) };
        self
    }
}

/// Query parameters of the events-list call. Unset fields are left out of the
/// request entirely.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl EventQuery {
    pub fn featured(limit: u32) -> Self {
        Self {
            featured: Some(true),
            limit: Some(limit),
            ..Default::default()
        }
    }
}

impl From<&EventFilter> for EventQuery {
    fn from(filter: &EventFilter) -> Self {
        Self {
            category: filter.category,
            status: filter.status,
            search: filter.search.clone().filter(|s| !s.is_empty()),
            featured: None,
            limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_through_query_string() {
        let filter = EventFilter::default()
            .with_category(Some(3))
            .with_status(Some(EventStatus::Upcoming))
            .with_search("jazz");

        let query = filter.to_query_string();
        assert_eq!(query, "category=3&status=upcoming&search=jazz");
        assert_eq!(EventFilter::from_query_string(&query), filter);
        assert_eq!(EventFilter::from_query_string(&format!("?{query}")), filter);
    }

    #[test]
    fn encodes_search_text() {
        let filter = EventFilter::default().with_search("rock & roll");
        let query = filter.to_query_string();
        assert_eq!(query, "search=rock+%26+roll");
        assert_eq!(
            EventFilter::from_query_string(&query).search.as_deref(),
            Some("rock & roll")
        );
    }

    #[test]
    fn drops_empty_and_invalid_values() {
        let filter = EventFilter::from_query_string("category=abc&status=soon&search=&page=2");
        assert_eq!(filter, EventFilter::default());
        assert!(filter.is_empty());
        assert_eq!(filter.to_query_string(), "");
    }

    #[test]
    fn first_repeated_key_wins() {
        let filter = EventFilter::from_query_string("category=1&category=2");
        assert_eq!(filter.category, Some(1));
    }

    #[test]
    fn page_path_omits_empty_query() {
        assert_eq!(EventFilter::default().page_path("/events"), "/events");
        assert_eq!(
            EventFilter::default()
                .with_category(Some(4))
                .page_path("/events"),
            "/events?category=4"
        );
    }

    #[test]
    fn query_carries_only_set_filters() {
        let filter = EventFilter::default().with_status(Some(EventStatus::Ongoing));
        let query = EventQuery::from(&filter);
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({ "status": "ongoing" }));
    }

    #[test]
    fn featured_query() {
        assert_eq!(
            serde_json::to_value(EventQuery::featured(6)).unwrap(),
            json!({ "featured": true, "limit": 6 })
        );
    }
}
