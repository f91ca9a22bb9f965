use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use crate::dto::configuration_dto::{
    CreateSelectionRequest, CreateSessionRequest, SelectionResponse, SessionResponse, UpdateSessionRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use serde::de::DeserializeOwned;

pub fn create_configuration_router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session).put(update_session))
        .route("/sessions/:id/selections", post(record_selection).get(list_selections))
        .route("/sessions/:id/selections/:selection_id", delete(remove_selection))
}

// Body opcional: vacío usa los valores por defecto, JSON inválido es un 400
async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let request = parse_optional_body::<CreateSessionRequest>(&body)?;
    let response = state.configuration_controller().create_session(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let response = state.configuration_controller().get_session(&id).await?;
    Ok(Json(response))
}

async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSessionRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let Json(request) = payload?;
    let response = state.configuration_controller().update_session(&id, request).await?;
    Ok(Json(response))
}

async fn record_selection(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateSelectionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SelectionResponse>), AppError> {
    let Json(request) = payload?;
    let response = state.configuration_controller().record_selection(&id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_selections(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<SelectionResponse>>, AppError> {
    let response = state.configuration_controller().list_selections(&id).await?;
    Ok(Json(response))
}

async fn remove_selection(
    State(state): State<AppState>,
    Path((id, selection_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .configuration_controller()
        .remove_selection(&id, &selection_id)
        .await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Selection removed"
    })))
}

fn parse_optional_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}
