//! Backend del configurador de vehículos
//!
//! Catálogo de chassis y carrocerías, sesiones de configuración,
//! cálculo de precios y cotizaciones con PDF.

pub mod app;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use app::create_app;
pub use state::AppState;
