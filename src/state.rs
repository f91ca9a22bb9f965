//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los almacenes se construyen en `main` y
//! se inyectan aquí.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::{
    CatalogController, ConfigurationController, PricingController, QuoteController, SavedConfigurationController,
};
use crate::repositories::{InMemoryStore, Repositories};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub repositories: Repositories,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, repositories: Repositories) -> Self {
        Self {
            config: Arc::new(config),
            repositories,
        }
    }

    /// Estado con el catálogo de demostración en memoria
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(config, Repositories::in_memory(InMemoryStore::with_demo_catalog()))
    }

    pub fn catalog_controller(&self) -> CatalogController {
        CatalogController::new(self.repositories.catalog.clone())
    }

    pub fn configuration_controller(&self) -> ConfigurationController {
        ConfigurationController::new(self.repositories.sessions.clone())
    }

    pub fn pricing_controller(&self) -> PricingController {
        PricingController::new(self.repositories.catalog.clone(), self.repositories.sessions.clone())
    }

    pub fn quote_controller(&self) -> QuoteController {
        QuoteController::new(
            self.repositories.catalog.clone(),
            self.repositories.sessions.clone(),
            self.repositories.quotes.clone(),
        )
    }

    pub fn saved_configuration_controller(&self) -> SavedConfigurationController {
        SavedConfigurationController::new(
            self.repositories.catalog.clone(),
            self.repositories.sessions.clone(),
            self.repositories.saved.clone(),
        )
    }
}
