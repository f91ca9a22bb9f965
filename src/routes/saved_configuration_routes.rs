use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::dto::saved_configuration_dto::{
    SaveConfigurationRequest, SaveConfigurationResponse, SharedConfigurationResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Se monta junto a las rutas de sesiones bajo `/api/configurations`
pub fn create_saved_configuration_router() -> Router<AppState> {
    Router::new()
        .route("/save", post(save_configuration))
        .route("/shared/:share_token", get(get_shared_configuration))
}

async fn save_configuration(
    State(state): State<AppState>,
    payload: Result<Json<SaveConfigurationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveConfigurationResponse>), AppError> {
    let Json(request) = payload?;
    let response = state.saved_configuration_controller().save_configuration(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_shared_configuration(
    State(state): State<AppState>,
    Path(share_token): Path<String>,
) -> Result<Json<SharedConfigurationResponse>, AppError> {
    let response = state.saved_configuration_controller().get_shared(&share_token).await?;
    Ok(Json(response))
}
