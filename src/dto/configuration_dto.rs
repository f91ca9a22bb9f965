use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ConfigurationSession, ConfigurationStep, Selection, SelectionType, SessionStatus};

// Request para crear una sesión; el body completo es opcional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub user_type: Option<String>,
}

// Request para actualizar una sesión
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    pub current_step: Option<String>,
    pub selected_chassis_id: Option<Uuid>,
    pub selected_body_id: Option<Uuid>,
    pub base_price: Option<Decimal>,
    pub options_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

// Response de sesión
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub session_token: String,
    pub user_type: String,
    pub current_step: ConfigurationStep,
    pub status: SessionStatus,
    pub selected_chassis_id: Option<Uuid>,
    pub selected_body_id: Option<Uuid>,
    pub base_price: Option<Decimal>,
    pub options_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionResponse {
    /// Construir la respuesta con el estado observado en `now`
    pub fn from_session(session: ConfigurationSession, now: DateTime<Utc>) -> Self {
        Self {
            status: session.effective_status(now),
            session_id: session.id,
            session_token: session.session_token,
            user_type: session.user_type,
            current_step: session.current_step,
            selected_chassis_id: session.selected_chassis_id,
            selected_body_id: session.selected_body_id,
            base_price: session.base_price,
            options_price: session.options_price,
            total_price: session.total_price,
            created_at: session.created_at,
            expires_at: session.expires_at,
        }
    }
}

// Request para registrar una selección.
// Los campos requeridos son opcionales aquí para devolver un 400 con el nombre del campo.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSelectionRequest {
    pub selection_type: Option<String>,
    /// Texto o número
    pub selected_item_id: Option<serde_json::Value>,
    pub selected_item_code: Option<String>,
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

// Response de selección
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub id: Uuid,
    pub session_id: Uuid,
    pub selection_type: SelectionType,
    pub selected_item_id: String,
    pub selected_item_code: Option<String>,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub is_valid: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Selection> for SelectionResponse {
    fn from(selection: Selection) -> Self {
        Self {
            id: selection.id,
            session_id: selection.session_id,
            selection_type: selection.selection_type,
            selected_item_id: selection.selected_item_id,
            selected_item_code: selection.selected_item_code,
            quantity: selection.quantity,
            unit_price: selection.unit_price,
            total_price: selection.total_price,
            is_valid: selection.is_valid,
            created_at: selection.created_at,
        }
    }
}
