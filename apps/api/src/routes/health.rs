use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports service version and whether the knowledge base came up degraded.
/// Always 200: a degraded knowledge base still serves recommendations.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let status = if state.knowledge_base.is_degraded() {
        "degraded"
    } else {
        "ok"
    };

    Json(json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "knowledge_base": state.knowledge_base.status(),
    }))
}
