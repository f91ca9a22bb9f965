use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::dto::quote_dto::{CreateQuoteRequest, QuoteResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_quote_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_quote))
        .route("/:id", get(get_quote))
        .route("/:id/pdf", get(get_quote_pdf))
}

async fn create_quote(
    State(state): State<AppState>,
    payload: Result<Json<CreateQuoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<QuoteResponse>), AppError> {
    let Json(request) = payload?;
    let response = state.quote_controller().create_quote(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuoteResponse>, AppError> {
    let response = state.quote_controller().get_quote(&id).await?;
    Ok(Json(response))
}

async fn get_quote_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rendered = state.quote_controller().render_pdf(&id).await?;
    let disposition = format!("attachment; filename=\"{}\"", rendered.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    ))
}
