//! Ciclo de vida de las sesiones de configuración
//!
//! Crear sesiones, registrar selecciones y actualizar el paso actual.
//! No se valida que el item seleccionado exista en el catálogo.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::dto::configuration_dto::{
    CreateSelectionRequest, CreateSessionRequest, SelectionResponse, SessionResponse, UpdateSessionRequest,
};
use crate::models::session::DEFAULT_USER_TYPE;
use crate::models::{ConfigurationSession, ConfigurationStep, NewSelection, SelectionType, SessionUpdate};
use crate::repositories::SessionRepository;
use crate::utils::errors::{bad_request_error, missing_field_error, not_found_error, AppError};
use crate::utils::token::random_hex_token;
use crate::utils::validation::{parse_id, require_field};

pub struct ConfigurationController {
    sessions: Arc<dyn SessionRepository>,
}

impl ConfigurationController {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn create_session(&self, request: CreateSessionRequest) -> Result<SessionResponse, AppError> {
        let now = Utc::now();
        let user_type = request
            .user_type
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_TYPE.to_string());

        let session = ConfigurationSession::new(random_hex_token(), user_type, now);
        let session = self.sessions.create_session(&session).await?;

        tracing::info!("✅ Sesión {} creada (user_type: {})", session.id, session.user_type);
        Ok(SessionResponse::from_session(session, now))
    }

    pub async fn get_session(&self, id: &str) -> Result<SessionResponse, AppError> {
        let session = self.find_session(id).await?;
        Ok(SessionResponse::from_session(session, Utc::now()))
    }

    pub async fn update_session(
        &self,
        id: &str,
        request: UpdateSessionRequest,
    ) -> Result<SessionResponse, AppError> {
        let session_id = parse_id(id, "Session")?;

        let current_step = match request.current_step.as_deref() {
            Some(step) => Some(step.parse::<ConfigurationStep>().map_err(AppError::BadRequest)?),
            None => None,
        };

        let update = SessionUpdate {
            current_step,
            status: None,
            selected_chassis_id: request.selected_chassis_id,
            selected_body_id: request.selected_body_id,
            base_price: request.base_price,
            options_price: request.options_price,
            total_price: request.total_price,
        };

        let session = self
            .sessions
            .update_session(session_id, &update)
            .await?
            .ok_or_else(|| not_found_error("Session"))?;

        tracing::info!("📝 Sesión {} actualizada (paso: {})", session.id, session.current_step);
        Ok(SessionResponse::from_session(session, Utc::now()))
    }

    /// Registrar una selección.
    ///
    /// Una selección de chassis o carrocería con id UUID también mueve el
    /// puntero correspondiente de la sesión, que es lo que lee el cálculo de precios.
    pub async fn record_selection(
        &self,
        session_id: &str,
        request: CreateSelectionRequest,
    ) -> Result<SelectionResponse, AppError> {
        let new_selection = validate_selection(request)?;

        let session = self.find_session(session_id).await?;
        let now = Utc::now();
        if !session.accepts_selections(now) {
            return Err(AppError::InvalidState(format!(
                "Session is {} and no longer accepts selections",
                session.effective_status(now)
            )));
        }

        let item_uuid = Uuid::parse_str(&new_selection.selected_item_id).ok();
        let pointer_update = match (new_selection.selection_type, item_uuid) {
            (SelectionType::Chassis, Some(id)) => Some(SessionUpdate {
                selected_chassis_id: Some(id),
                ..Default::default()
            }),
            (SelectionType::Body, Some(id)) => Some(SessionUpdate {
                selected_body_id: Some(id),
                ..Default::default()
            }),
            _ => None,
        };

        // El puntero va primero: si falla, no queda una selección huérfana
        if let Some(update) = pointer_update {
            self.sessions
                .update_session(session.id, &update)
                .await?
                .ok_or_else(|| not_found_error("Session"))?;
        }

        let selection = self.sessions.insert_selection(session.id, new_selection).await?;

        tracing::info!(
            "✅ Selección {} registrada en sesión {} ({} = {})",
            selection.id,
            session.id,
            selection.selection_type,
            selection.selected_item_id
        );
        Ok(SelectionResponse::from(selection))
    }

    pub async fn list_selections(&self, session_id: &str) -> Result<Vec<SelectionResponse>, AppError> {
        let session = self.find_session(session_id).await?;
        let selections = self.sessions.list_selections(session.id).await?;
        Ok(selections.into_iter().map(SelectionResponse::from).collect())
    }

    pub async fn remove_selection(&self, session_id: &str, selection_id: &str) -> Result<(), AppError> {
        let session = self.find_session(session_id).await?;
        let selection_id = parse_id(selection_id, "Selection")?;

        if !self.sessions.delete_selection(session.id, selection_id).await? {
            return Err(not_found_error("Selection"));
        }

        tracing::info!("🗑️ Selección {} eliminada de sesión {}", selection_id, session.id);
        Ok(())
    }

    async fn find_session(&self, id: &str) -> Result<ConfigurationSession, AppError> {
        let id = parse_id(id, "Session")?;
        self.sessions
            .find_session(id)
            .await?
            .ok_or_else(|| not_found_error("Session"))
    }
}

/// Validar el request antes de tocar el almacén
fn validate_selection(request: CreateSelectionRequest) -> Result<NewSelection, AppError> {
    let selection_type: SelectionType = require_field(request.selection_type, "selectionType")?
        .trim()
        .parse()
        .map_err(AppError::BadRequest)?;

    let selected_item_id = match request.selected_item_id {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Null) | None => return Err(missing_field_error("selectedItemId")),
        Some(serde_json::Value::String(_)) => return Err(missing_field_error("selectedItemId")),
        Some(_) => return Err(bad_request_error("selectedItemId must be a string or number")),
    };

    let quantity = request.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(bad_request_error("quantity must be at least 1"));
    }

    Ok(NewSelection {
        selection_type,
        selected_item_id,
        selected_item_code: request.selected_item_code,
        quantity,
        unit_price: request.unit_price,
        total_price: request.total_price,
    })
}
