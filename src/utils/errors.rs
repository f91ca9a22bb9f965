//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.
//! Los errores de almacenamiento se registran en el servidor y
//! el cliente solo recibe un mensaje genérico.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidState(_) => StatusCode::CONFLICT,
            AppError::Storage(_) | AppError::Render(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::Storage(msg) => {
                tracing::error!("❌ Storage error: {}", msg);
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "STORAGE_ERROR",
                }
            }

            AppError::Validation(e) => {
                tracing::warn!("⚠️ Validation error: {}", e);
                let mut fields: Vec<String> = e.field_errors().keys().map(|f| camel_case(f)).collect();
                fields.sort_unstable();
                ErrorResponse {
                    error: format!("Invalid field: {}", fields.join(", ")),
                    code: "VALIDATION_ERROR",
                }
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("⚠️ Bad request: {}", msg);
                ErrorResponse {
                    error: msg,
                    code: "BAD_REQUEST",
                }
            }

            AppError::NotFound(msg) => {
                tracing::debug!("Resource not found: {}", msg);
                ErrorResponse {
                    error: msg,
                    code: "NOT_FOUND",
                }
            }

            AppError::InvalidState(msg) => {
                tracing::warn!("⚠️ Invalid state: {}", msg);
                ErrorResponse {
                    error: msg,
                    code: "INVALID_STATE",
                }
            }

            AppError::Render(msg) => {
                tracing::error!("❌ PDF render error: {}", msg);
                ErrorResponse {
                    error: "Failed to generate PDF".to_string(),
                    code: "RENDER_ERROR",
                }
            }

            AppError::Internal(msg) => {
                tracing::error!("❌ Internal error: {}", msg);
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    code: "INTERNAL_ERROR",
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

// Body JSON mal formado o con tipos incorrectos
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

// Los nombres de campo de validator son los del struct; la API usa camelCase
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str) -> AppError {
    AppError::NotFound(format!("{} not found", resource))
}

/// Función helper para campos requeridos ausentes
pub fn missing_field_error(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing required field: {}", field))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
