use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::dto::catalog_dto::{CatalogQuery, CatalogResponse, FilterOptionsResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(search_vehicles))
        .route("/filters", get(filter_options))
}

async fn search_vehicles(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<CatalogResponse>, AppError> {
    let response = state.catalog_controller().search_vehicles(query).await?;
    Ok(Json(response))
}

async fn filter_options(State(state): State<AppState>) -> Result<Json<FilterOptionsResponse>, AppError> {
    let response = state.catalog_controller().filter_options().await?;
    Ok(Json(response))
}
