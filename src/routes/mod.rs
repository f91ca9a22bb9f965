//! Rutas HTTP
//!
//! Cada recurso expone su propio router, montado bajo `/api` en `app.rs`.

pub mod body_routes;
pub mod catalog_routes;
pub mod chassis_routes;
pub mod configuration_routes;
pub mod health_routes;
pub mod pricing_routes;
pub mod quote_routes;
pub mod saved_configuration_routes;
