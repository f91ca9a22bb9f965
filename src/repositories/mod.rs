//! Repositorios
//!
//! Acceso a los almacenes externos. Cada almacén es un trait para poder
//! inyectar la implementación PostgreSQL o la implementación en memoria.

pub mod catalog_repository;
pub mod memory_repository;
pub mod quote_repository;
pub mod saved_configuration_repository;
pub mod session_repository;

use std::sync::Arc;

pub use catalog_repository::{CatalogRepository, PgCatalogRepository};
pub use memory_repository::InMemoryStore;
pub use quote_repository::{PgQuoteRepository, QuoteRepository};
pub use saved_configuration_repository::{PgSavedConfigurationRepository, SavedConfigurationRepository};
pub use session_repository::{PgSessionRepository, SessionRepository};

use sqlx::PgPool;

/// Conjunto de almacenes usado por la aplicación
#[derive(Clone)]
pub struct Repositories {
    pub catalog: Arc<dyn CatalogRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub quotes: Arc<dyn QuoteRepository>,
    pub saved: Arc<dyn SavedConfigurationRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            catalog: Arc::new(PgCatalogRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool.clone())),
            quotes: Arc::new(PgQuoteRepository::new(pool.clone())),
            saved: Arc::new(PgSavedConfigurationRepository::new(pool)),
        }
    }

    pub fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            catalog: store.clone(),
            sessions: store.clone(),
            quotes: store.clone(),
            saved: store,
        }
    }
}
