//! HTTP access to the Event Finder REST API.
//!
//! One [`ApiClient`] is configured per process. Every request passes through
//! [`ApiClient::intercept`], which attaches the persisted token right before
//! dispatch. Calls are single attempts: no retries, no caching.

use std::sync::Arc;

use eventfinder_types::{
    Attendance, AttendanceStatus, AttendanceStatusUpdate, Category, Event, EventInput, EventQuery,
    LoginCredentials, ProfileUpdate, Registration, TokenResponse, User,
};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::storage::TokenSource;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Absolute URL of the API root, e.g. `http://localhost:3000/api`.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// API root under `origin`, e.g. `https://events.example` -> `https://events.example/api`.
    pub fn for_origin(origin: &str) -> Self {
        Self::new(format!(
            "{}{}",
            origin.trim_end_matches('/'),
            eventfinder_types::API_BASE_PATH
        ))
    }
}

/// Successful response with its decoded payload.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenSource>) -> Result<Self, ApiError> {
        // Url::join drops the last segment unless the base ends with '/'.
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let baseUrl = Url::parse(&base).map_err(|e| ApiError::Url(format!("{base}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: baseUrl,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Attaches `Authorization: Bearer <token>` when a token is persisted.
    pub fn intercept(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::Url(format!("{path}: {e}")))?;
        debug!("api request: {method} {url}");
        Ok(self.http.request(method, url))
    }

    async fn dispatch(&self, builder: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = self.intercept(builder).send().await.map_err(|e| {
            warn!("api request failed: {e}");
            ApiError::Network(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let error = ApiError::from_body(status.as_u16(), &body);
        debug!(status = status.as_u16(), "api error response: {error}");
        Err(error)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = self.dispatch(builder).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        let data = serde_json::from_slice(&body)
            .map_err(|e| ApiError::Decode(format!("response body: {e}")))?;
        Ok(ApiResponse { status, data })
    }

    /// For calls whose response body carries nothing beyond success.
    async fn fetch_empty(&self, builder: RequestBuilder) -> Result<ApiResponse<()>, ApiError> {
        let response = self.dispatch(builder).await?;
        Ok(ApiResponse {
            status: response.status().as_u16(),
            data: (),
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, ApiError> {
        self.fetch(self.request(Method::GET, path)?).await
    }

    async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(self.request(method, path)?.json(body)).await
    }

    // ── Events ──────────────────────────────────────────────────────

    pub async fn list_events(&self, query: &EventQuery) -> Result<ApiResponse<Vec<Event>>, ApiError> {
        self.fetch(self.request(Method::GET, "events/")?.query(query))
            .await
    }

    pub async fn get_event(&self, id: u64) -> Result<ApiResponse<Event>, ApiError> {
        self.get(&format!("events/{id}/")).await
    }

    pub async fn create_event(&self, input: &EventInput) -> Result<ApiResponse<Event>, ApiError> {
        self.send_json(Method::POST, "events/", input).await
    }

    pub async fn update_event(
        &self,
        id: u64,
        input: &EventInput,
    ) -> Result<ApiResponse<Event>, ApiError> {
        self.send_json(Method::PUT, &format!("events/{id}/"), input)
            .await
    }

    pub async fn delete_event(&self, id: u64) -> Result<ApiResponse<()>, ApiError> {
        self.fetch_empty(self.request(Method::DELETE, &format!("events/{id}/"))?)
            .await
    }

    pub async fn register_for_event(&self, id: u64) -> Result<ApiResponse<()>, ApiError> {
        self.fetch_empty(self.request(Method::POST, &format!("events/{id}/register/"))?)
            .await
    }

    pub async fn cancel_registration(&self, id: u64) -> Result<ApiResponse<()>, ApiError> {
        self.fetch_empty(self.request(Method::POST, &format!("events/{id}/cancel/"))?)
            .await
    }

    // ── Categories ──────────────────────────────────────────────────

    pub async fn list_categories(&self) -> Result<ApiResponse<Vec<Category>>, ApiError> {
        self.get("categories/").await
    }

    pub async fn get_category(&self, id: u64) -> Result<ApiResponse<Category>, ApiError> {
        self.get(&format!("categories/{id}/")).await
    }

    // ── Auth ────────────────────────────────────────────────────────

    pub async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<ApiResponse<TokenResponse>, ApiError> {
        self.send_json(Method::POST, "auth/login/", credentials)
            .await
    }

    pub async fn register(
        &self,
        registration: &Registration,
    ) -> Result<ApiResponse<TokenResponse>, ApiError> {
        self.send_json(Method::POST, "auth/register/", registration)
            .await
    }

    pub async fn get_profile(&self) -> Result<ApiResponse<User>, ApiError> {
        self.get("auth/profile/").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ApiResponse<User>, ApiError> {
        self.send_json(Method::PUT, "auth/profile/", update).await
    }

    // ── Attendances ─────────────────────────────────────────────────

    pub async fn list_attendances(&self) -> Result<ApiResponse<Vec<Attendance>>, ApiError> {
        self.get("attendances/").await
    }

    pub async fn update_attendance_status(
        &self,
        id: u64,
        status: AttendanceStatus,
    ) -> Result<ApiResponse<Attendance>, ApiError> {
        self.send_json(
            Method::PATCH,
            &format!("attendances/{id}/"),
            &AttendanceStatusUpdate { status },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStore;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(ClientConfig::new(base), Arc::new(MemoryTokenStore::new())).unwrap()
    }

    #[test]
    fn base_url_keeps_api_prefix() {
        for base in ["http://localhost:8000/api", "http://localhost:8000/api/"] {
            let client = client(base);
            let url = client.base_url().join("events/3/register/").unwrap();
            assert_eq!(url.as_str(), "http://localhost:8000/api/events/3/register/");
        }
    }

    #[test]
    fn origin_config_appends_prefix() {
        let config = ClientConfig::for_origin("https://events.example/");
        assert_eq!(config.base_url, "https://events.example/api");
    }

    #[test]
    fn rejects_relative_base() {
        let result = ApiClient::new(ClientConfig::new("/api"), Arc::new(MemoryTokenStore::new()));
        let err = result.err().unwrap();
        assert!(matches!(err, ApiError::Url(_)));
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }
}
