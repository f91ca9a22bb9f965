//! Configuraciones guardadas (tabla `saved_configurations`)
//!
//! Una foto de la sesión en el momento de guardarla, compartible por token.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Selection;

/// Contenido congelado de la sesión
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedConfigurationData {
    pub chassis_id: Option<Uuid>,
    pub body_id: Option<Uuid>,
    pub selections: Vec<Selection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedConfiguration {
    pub id: Uuid,
    pub configuration_name: String,
    pub user_email: Option<String>,
    pub session_id: Uuid,
    pub configuration_data: SavedConfigurationData,
    pub total_price: Decimal,
    pub is_favorite: bool,
    pub share_token: String,
    pub created_at: DateTime<Utc>,
}

impl SavedConfiguration {
    pub fn share_url(&self) -> String {
        format!("/api/configurations/shared/{}", self.share_token)
    }
}
