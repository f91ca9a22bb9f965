use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::dto::catalog_dto::ChassisResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_chassis_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_chassis))
        .route("/:id", get(get_chassis))
}

async fn list_chassis(State(state): State<AppState>) -> Result<Json<Vec<ChassisResponse>>, AppError> {
    let response = state.catalog_controller().list_chassis().await?;
    Ok(Json(response))
}

async fn get_chassis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChassisResponse>, AppError> {
    let response = state.catalog_controller().get_chassis(&id).await?;
    Ok(Json(response))
}
