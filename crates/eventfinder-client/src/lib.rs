#![allow(non_snake_case)]

pub mod error;
pub mod gateway;
pub mod session;
pub mod storage;

use std::sync::Arc;

pub use error::{ApiError, ErrorKind};
pub use gateway::{ApiClient, ApiResponse, ClientConfig};
pub use session::{Navigator, SessionError, SessionStore, LANDING_PATH, LOGIN_PATH};
pub use storage::{MemoryTokenStore, StorageError, TokenSource, TokenStore};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileTokenStore;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageTokenStore;

/// Wires a gateway and a session store around one token store.
///
/// The gateway only sees the store as a [`TokenSource`]; the session store is
/// the only component that can write it.
pub fn connect<S>(
    config: ClientConfig,
    tokens: Arc<S>,
    navigator: Arc<dyn Navigator>,
) -> Result<SessionStore, ApiError>
where
    S: TokenStore + 'static,
{
    let tokenSource: Arc<dyn TokenSource> = tokens.clone();
    let client = ApiClient::new(config, tokenSource)?;
    Ok(SessionStore::new(client, tokens, navigator))
}
