use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("upstream unavailable: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("request body rejected: {0}")]
    Body(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ProxyError::Upstream(_) => (StatusCode::BAD_GATEWAY, "Upstream API unavailable."),
            ProxyError::Body(_) => (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large."),
        };
        tracing::warn!("api forwarding failed: {self}");
        (
            status,
            Json(ErrorResponse {
                detail: detail.into(),
            }),
        )
            .into_response()
    }
}
