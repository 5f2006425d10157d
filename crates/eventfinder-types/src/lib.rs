#![allow(non_snake_case)]

pub mod auth;
pub mod event;
pub mod filter;
pub mod session;

pub use auth::*;
pub use event::*;
pub use filter::*;
pub use session::*;

/// Key under which the session token is persisted.
pub const TOKEN_KEY: &str = "token";

/// Path prefix every REST resource is rooted under.
pub const API_BASE_PATH: &str = "/api";
