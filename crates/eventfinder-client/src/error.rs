//! Gateway error types.

use serde_json::Value;

/// Broad class of a failed call, for callers that branch on failure type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received.
    Transport,
    /// 401 or 403: missing, expired or rejected token.
    Unauthorized,
    /// 404: the requested entity does not exist.
    NotFound,
    /// Any other 4xx, usually with a `detail` explaining the rejection.
    Rejected,
    /// 5xx.
    Server,
    /// A success response whose body did not match the expected schema.
    Decode,
    /// The request could not be built: bad base URL or path. Nothing was sent.
    Config,
}

/// Errors returned by every gateway operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure.
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response.
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("request failed"))]
    Server {
        status: u16,
        /// `detail` field of the error payload, when present.
        detail: Option<String>,
        /// Raw error payload, when the body was JSON.
        payload: Option<Value>,
    },

    #[error("decode: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    Url(String),
}

impl ApiError {
    /// Builds a `Server` error from a status code and raw response body.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let payload = serde_json::from_slice::<Value>(body).ok();
        let detail = payload
            .as_ref()
            .and_then(|p| p.get("detail"))
            .and_then(Value::as_str)
            .map(str::to_string);
        ApiError::Server {
            status,
            detail,
            payload,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server-provided explanation of the failure.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The server's `detail` if it sent one, `fallback` otherwise.
    pub fn message_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(e) if e.is_builder() => ErrorKind::Config,
            ApiError::Network(_) => ErrorKind::Transport,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::Url(_) => ErrorKind::Config,
            ApiError::Server { status, .. } => match *status {
                401 | 403 => ErrorKind::Unauthorized,
                404 => ErrorKind::NotFound,
                400..=499 => ErrorKind::Rejected,
                _ => ErrorKind::Server,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_detail_from_payload() {
        let err = ApiError::from_body(400, br#"{"detail":"This event has reached maximum capacity."}"#);
        assert_eq!(err.detail(), Some("This event has reached maximum capacity."));
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(
            err.to_string(),
            "HTTP 400: This event has reached maximum capacity."
        );
    }

    #[test]
    fn keeps_payload_without_detail() {
        let err = ApiError::from_body(400, br#"{"username":["already taken"]}"#);
        assert_eq!(err.detail(), None);
        assert_eq!(err.message_or("Registration failed."), "Registration failed.");
        match err {
            ApiError::Server { payload, .. } => {
                assert!(payload.unwrap().get("username").is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_body_has_no_payload() {
        let err = ApiError::from_body(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.to_string(), "HTTP 502: request failed");
    }

    #[test]
    fn classifies_auth_and_missing() {
        assert_eq!(ApiError::from_body(401, b"").kind(), ErrorKind::Unauthorized);
        assert_eq!(ApiError::from_body(403, b"").kind(), ErrorKind::Unauthorized);
        assert_eq!(ApiError::from_body(404, b"").kind(), ErrorKind::NotFound);
        assert_eq!(ApiError::Decode("x".into()).kind(), ErrorKind::Decode);
    }

    #[test]
    fn bad_url_is_a_config_error() {
        let err = ApiError::Url("not a url: relative URL without a base".into());
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.status(), None);
    }
}
