//! Router de la aplicación
//!
//! Monta las rutas de cada recurso bajo `/api` con CORS, compresión y
//! trazas HTTP.

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::routes::{
    body_routes, catalog_routes, chassis_routes, configuration_routes, health_routes, pricing_routes, quote_routes,
    saved_configuration_routes,
};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .nest("/api/health", health_routes::create_health_router())
        .nest("/api/chassis", chassis_routes::create_chassis_router())
        .nest("/api/bodies", body_routes::create_body_router())
        .nest("/api/catalog", catalog_routes::create_catalog_router())
        .nest(
            "/api/configurations",
            configuration_routes::create_configuration_router()
                .merge(saved_configuration_routes::create_saved_configuration_router()),
        )
        .nest("/api/pricing", pricing_routes::create_pricing_router())
        .nest("/api/quotes", quote_routes::create_quote_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
