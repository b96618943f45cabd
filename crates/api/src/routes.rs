use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Reload trigger endpoints. Any method other than POST gets a 405.
pub fn create_reload_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/updateAll", post(handlers::update_all))
        .route("/updateBlock", post(handlers::update_block))
        .route("/updateWhite", post(handlers::update_white))
        .route("/updateBlack", post(handlers::update_black))
        .with_state(state)
}
