//! Controladores
//!
//! Orquestan repositorios y servicios para cada operación de la API.

pub mod catalog_controller;
pub mod configuration_controller;
pub mod pricing_controller;
pub mod quote_controller;
pub mod saved_configuration_controller;

pub use catalog_controller::CatalogController;
pub use configuration_controller::ConfigurationController;
pub use pricing_controller::PricingController;
pub use quote_controller::{QuoteController, RenderedQuote};
pub use saved_configuration_controller::SavedConfigurationController;
