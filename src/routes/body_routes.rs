use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::dto::catalog_dto::BodyResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_body_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bodies))
        .route("/:id", get(get_body))
}

async fn list_bodies(State(state): State<AppState>) -> Result<Json<Vec<BodyResponse>>, AppError> {
    let response = state.catalog_controller().list_bodies().await?;
    Ok(Json(response))
}

async fn get_body(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BodyResponse>, AppError> {
    let response = state.catalog_controller().get_body(&id).await?;
    Ok(Json(response))
}
