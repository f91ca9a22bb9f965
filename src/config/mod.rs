//! Configuración del proyecto
//!
//! Variables de entorno y configuración del pool de base de datos.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::{ConfigError, EnvironmentConfig, StoreBackend};
