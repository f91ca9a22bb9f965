use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::dto::pricing_dto::PricingResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_pricing_router() -> Router<AppState> {
    Router::new().route("/sessions/:id", get(get_pricing))
}

async fn get_pricing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PricingResponse>, AppError> {
    let response = state.pricing_controller().get_pricing(&id).await?;
    Ok(Json(response))
}
