#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use eventfinder_client::{connect, ClientConfig, MemoryTokenStore, Navigator, SessionStore};
use eventfinder_types::Session;
use serde_json::{json, Value};
use wiremock::MockServer;

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_string());
    }
}

pub struct Harness {
    pub server: MockServer,
    pub tokens: Arc<MemoryTokenStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub session: SessionStore,
    pub history: Arc<Mutex<Vec<Session>>>,
}

impl Harness {
    pub async fn start(tokens: MemoryTokenStore) -> Self {
        let server = MockServer::start().await;
        let tokens = Arc::new(tokens);
        let navigator = Arc::new(RecordingNavigator::default());
        let session = connect(
            ClientConfig::new(format!("{}/api", server.uri())),
            tokens.clone(),
            navigator.clone(),
        )
        .unwrap();

        let history = Arc::new(Mutex::new(Vec::new()));
        let recorded = history.clone();
        session.subscribe(move |s| recorded.lock().unwrap().push(s.clone()));

        Self {
            server,
            tokens,
            navigator,
            session,
            history,
        }
    }

    pub fn history(&self) -> Vec<Session> {
        self.history.lock().unwrap().clone()
    }

    /// Authorization header of every request the mock server received, in order.
    pub async fn auth_headers(&self) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| {
                r.headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .collect()
    }
}

pub fn profile_json() -> Value {
    json!({ "id": 1, "username": "a", "email": "a@example.com" })
}

pub fn event_json(id: u64, attendees: u32, max: Option<u32>) -> Value {
    json!({
        "id": id,
        "title": "Jazz Night",
        "description": "Live jazz\nBring friends",
        "location": "Blue Room",
        "start_date": "2025-03-05T18:30:00Z",
        "end_date": "2025-03-05T22:00:00Z",
        "organizer": { "id": 2, "username": "host" },
        "category": 3,
        "category_name": "Music",
        "status": "upcoming",
        "is_featured": false,
        "max_attendees": max,
        "attendees_count": attendees
    })
}
