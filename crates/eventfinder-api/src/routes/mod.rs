pub mod forward;

use axum::Router;

use crate::AppState;

pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new().merge(forward::routes(state))
}
