//! Objetos de transferencia de la API (JSON en camelCase)

pub mod catalog_dto;
pub mod configuration_dto;
pub mod pricing_dto;
pub mod quote_dto;
pub mod saved_configuration_dto;
