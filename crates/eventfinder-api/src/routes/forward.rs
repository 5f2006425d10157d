//! Forwards `/api/*` to the REST backend so the browser can stay same-origin.
//! Method, path, query, body and end-to-end headers (including
//! `Authorization`) pass through untouched; the backend's status and body come
//! back verbatim.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName},
    response::Response,
    routing::any,
    Router,
};

use crate::error::ProxyError;
use crate::AppState;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api", any(forward))
        .route("/api/*rest", any(forward))
}

fn end_to_end(headers: &HeaderMap) -> HeaderMap {
    let hopByHop: [HeaderName; 10] = [
        header::CONNECTION,
        header::HOST,
        header::CONTENT_LENGTH,
        header::TRANSFER_ENCODING,
        header::TE,
        header::TRAILER,
        header::UPGRADE,
        header::PROXY_AUTHENTICATE,
        header::PROXY_AUTHORIZATION,
        HeaderName::from_static("keep-alive"),
    ];

    let mut filtered = headers.clone();
    for name in &hopByHop {
        filtered.remove(name);
    }
    filtered
}

async fn forward(State(state): State<AppState>, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let pathAndQuery = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/api");
    let target = format!("{}{}", state.upstream, pathAndQuery);

    let bodyBytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    tracing::debug!("forwarding {} {target}", parts.method);

    let upstreamResponse = state
        .http
        .request(parts.method.clone(), &target)
        .headers(end_to_end(&parts.headers))
        .body(bodyBytes)
        .send()
        .await?;

    let status = upstreamResponse.status();
    let headers = end_to_end(upstreamResponse.headers());
    let responseBody = upstreamResponse.bytes().await?;

    let mut response = Response::new(Body::from(responseBody));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
