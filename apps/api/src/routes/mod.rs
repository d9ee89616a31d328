pub mod health;

use axum::{routing::get, Router};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/recommend", get(handlers::handle_recommend))
        .with_state(state)
}
