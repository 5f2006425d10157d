//! Authentication lifecycle.
//!
//! [`SessionStore`] is the only writer of the persisted token. A user is only
//! ever published together with the token it was validated with, and always
//! comes from the profile endpoint, never from the login response.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use eventfinder_types::{
    LoginCredentials, ProfileUpdate, Registration, Session, TokenResponse, User,
};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::gateway::{ApiClient, ApiResponse};
use crate::storage::{StorageError, TokenStore};

/// Landing view after a successful login or registration.
pub const LANDING_PATH: &str = "/";

/// View shown after logout.
pub const LOGIN_PATH: &str = "/login";

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

/// Moves the user between views.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("token storage: {0}")]
    Storage(#[from] StorageError),

    #[error("no persisted token")]
    NoToken,
}

impl SessionError {
    /// Message to show the user: the server's `detail` when present.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            SessionError::Api(e) => e.message_or(fallback),
            _ => fallback.to_string(),
        }
    }
}

pub struct SessionStore {
    client: ApiClient,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    state: RwLock<Session>,
    listeners: RwLock<Vec<Listener>>,
}

impl SessionStore {
    pub fn new(client: ApiClient, tokens: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            client,
            tokens,
            navigator,
            state: RwLock::new(Session::unauthenticated()),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Gateway sharing this store's token.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn current(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Registers an observer that receives every published state, in order.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Initial transition at process start: validate a persisted token if
    /// there is one, otherwise settle at unauthenticated.
    pub async fn start(&self) -> Session {
        match self.tokens.load() {
            Some(token) => {
                let _ = self.validate(token).await;
            }
            None => self.publish(Session::unauthenticated()),
        }
        self.current()
    }

    /// Re-validates the persisted token against the profile endpoint.
    pub async fn refresh(&self) -> Result<User, SessionError> {
        match self.tokens.load() {
            Some(token) => self.validate(token).await,
            None => {
                self.publish(Session::unauthenticated());
                Err(SessionError::NoToken)
            }
        }
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, SessionError> {
        info!(username = %credentials.username, "logging in");
        self.authenticate(self.client.login(credentials), LOGIN_FAILED_MESSAGE)
            .await
    }

    pub async fn register(&self, registration: &Registration) -> Result<User, SessionError> {
        info!(username = %registration.username, "registering account");
        self.authenticate(self.client.register(registration), REGISTRATION_FAILED_MESSAGE)
            .await
    }

    /// Clears the token and user before returning, then moves to the login view.
    pub fn logout(&self) {
        self.discard_token();
        self.publish(Session::unauthenticated());
        self.navigator.navigate(LOGIN_PATH);
    }

    /// Saves profile changes and republishes the session with the server's copy.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, SessionError> {
        let user = self.client.update_profile(update).await?.into_data();
        if let Some(token) = self.tokens.load() {
            self.publish(Session::authenticated(token, user.clone()));
        }
        Ok(user)
    }

    async fn authenticate<F>(&self, request: F, fallback: &str) -> Result<User, SessionError>
    where
        F: Future<Output = Result<ApiResponse<TokenResponse>, ApiError>>,
    {
        self.publish(Session::loading(None));

        let token = match request.await {
            Ok(response) => response.data.token,
            Err(e) => return Err(self.fail(e.into(), fallback)),
        };

        if let Err(e) = self.tokens.save(&token) {
            return Err(self.fail(e.into(), fallback));
        }

        let user = self.validate(token).await?;
        self.navigator.navigate(LANDING_PATH);
        Ok(user)
    }

    /// Fetches the profile with `token` persisted. On failure the token is
    /// cleared before the signed-out state is published.
    async fn validate(&self, token: String) -> Result<User, SessionError> {
        self.publish(Session::loading(Some(token.clone())));

        match self.client.get_profile().await {
            Ok(response) => {
                let user = response.into_data();
                self.publish(Session::authenticated(token, user.clone()));
                Ok(user)
            }
            Err(e) => {
                warn!("profile validation failed: {e}");
                self.discard_token();
                self.publish(Session::signed_out(SESSION_EXPIRED_MESSAGE));
                Err(e.into())
            }
        }
    }

    fn fail(&self, error: SessionError, fallback: &str) -> SessionError {
        let message = error.user_message(fallback);
        warn!("authentication failed: {error}");
        self.publish(Session::failed(message.clone()));
        self.publish(Session::signed_out(message));
        error
    }

    fn discard_token(&self) {
        if let Err(e) = self.tokens.clear() {
            warn!("failed to clear persisted token: {e}");
        }
    }

    fn publish(&self, session: Session) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = session.clone();

        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener(&session);
        }
    }
}
