use axum::{extract::State, routing::get, Json, Router};

use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "environment": state.config.environment,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
