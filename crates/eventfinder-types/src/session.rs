use serde::{Deserialize, Serialize};

use crate::auth::User;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Loading,
    Authenticated,
    Error,
}

/// Client-side view of the signed-in user.
///
/// Only constructible through the transition constructors below, so a user is
/// never held without the token it was validated with. Not deserializable for
/// the same reason:
///
/// ```compile_fail
/// let session: eventfinder_types::Session = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    status: SessionStatus,
    error: Option<String>,
}

impl Session {
    pub fn unauthenticated() -> Self {
        Self {
            token: None,
            user: None,
            status: SessionStatus::Unauthenticated,
            error: None,
        }
    }

    /// Signed out with the reason recorded.
    pub fn signed_out(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::unauthenticated()
        }
    }

    /// An auth operation is in flight. `token` is the one being validated, if any.
    pub fn loading(token: Option<String>) -> Self {
        Self {
            token,
            user: None,
            status: SessionStatus::Loading,
            error: None,
        }
    }

    pub fn authenticated(token: String, user: User) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
            status: SessionStatus::Authenticated,
            error: None,
        }
    }

    /// Transient failure snapshot published before settling at `signed_out`.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            token: None,
            user: None,
            status: SessionStatus::Error,
            error: Some(error.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unauthenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> User {
        serde_json::from_value(json!({ "id": 1, "username": "a" })).unwrap()
    }

    #[test]
    fn authenticated_holds_token_and_user() {
        let session = Session::authenticated("T".into(), user());
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("T"));
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("a"));
        assert_eq!(session.error(), None);
    }

    #[test]
    fn failure_states_hold_neither_token_nor_user() {
        for session in [Session::failed("bad"), Session::signed_out("bad")] {
            assert_eq!(session.token(), None);
            assert!(session.user().is_none());
            assert_eq!(session.error(), Some("bad"));
        }
        assert_eq!(Session::failed("x").status(), SessionStatus::Error);
        assert_eq!(Session::signed_out("x").status(), SessionStatus::Unauthenticated);
    }

    #[test]
    fn loading_never_carries_a_user() {
        let session = Session::loading(Some("T".into()));
        assert!(session.is_loading());
        assert!(session.user().is_none());
    }
}
