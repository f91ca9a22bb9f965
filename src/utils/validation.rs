//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use uuid::Uuid;

use crate::utils::errors::{missing_field_error, not_found_error, AppResult};

/// Extraer un campo requerido; vacío cuenta como ausente
pub fn require_field(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing_field_error(field)),
    }
}

/// Recortar un campo opcional; en blanco pasa a `None`
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Convertir un id de ruta a UUID.
///
/// Un id mal formado no puede existir en el almacén, por lo que se
/// reporta como recurso no encontrado.
pub fn parse_id(value: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|_| not_found_error(resource))
}

/// Convertir un filtro numérico opcional, ignorando valores inválidos
pub fn parse_optional_i32(value: Option<&str>) -> Option<i32> {
    value.and_then(|v| v.trim().parse::<i32>().ok())
}
