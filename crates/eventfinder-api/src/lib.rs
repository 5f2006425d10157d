#![allow(non_snake_case)]

pub mod error;
pub mod routes;

use axum::Router;

/// Shared state of the `/api` routes.
#[derive(Clone)]
pub struct AppState {
    /// Origin of the REST backend, e.g. `http://127.0.0.1:8000`.
    pub upstream: String,
    pub http: reqwest::Client,
}

impl AppState {
    /// Redirects from the backend are handed to the browser, not followed.
    pub fn new(upstream: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            upstream: upstream.into().trim_end_matches('/').to_string(),
            http,
        })
    }
}

pub fn api_router(state: AppState) -> Router {
    let apiRoutes = routes::api_routes(state.clone());

    Router::new().merge(apiRoutes).with_state(state)
}
