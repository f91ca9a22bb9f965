use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::configuration_dto::SelectionResponse;
use crate::models::SavedConfiguration;
use crate::utils::validation::trim_optional;

// Request para guardar la configuración de una sesión
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfigurationRequest {
    pub session_id: Option<String>,

    #[validate(length(max = 200))]
    pub configuration_name: Option<String>,

    #[validate(email)]
    pub user_email: Option<String>,

    #[serde(default)]
    pub is_favorite: bool,
}

impl SaveConfigurationRequest {
    pub fn normalized(self) -> Self {
        Self {
            session_id: trim_optional(self.session_id),
            configuration_name: trim_optional(self.configuration_name),
            user_email: trim_optional(self.user_email),
            is_favorite: self.is_favorite,
        }
    }
}

// Response al guardar
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfigurationResponse {
    pub configuration_id: Uuid,
    pub share_token: String,
    pub share_url: String,
}

impl From<&SavedConfiguration> for SaveConfigurationResponse {
    fn from(saved: &SavedConfiguration) -> Self {
        Self {
            configuration_id: saved.id,
            share_token: saved.share_token.clone(),
            share_url: saved.share_url(),
        }
    }
}

// Response de una configuración compartida
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedConfigurationResponse {
    pub configuration_id: Uuid,
    pub configuration_name: String,
    pub session_id: Uuid,
    pub chassis_id: Option<Uuid>,
    pub body_id: Option<Uuid>,
    pub selections: Vec<SelectionResponse>,
    pub total_price: Decimal,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}

// El email de quien guardó no se expone a quien abre el enlace
impl From<SavedConfiguration> for SharedConfigurationResponse {
    fn from(saved: SavedConfiguration) -> Self {
        Self {
            configuration_id: saved.id,
            configuration_name: saved.configuration_name,
            session_id: saved.session_id,
            chassis_id: saved.configuration_data.chassis_id,
            body_id: saved.configuration_data.body_id,
            selections: saved
                .configuration_data
                .selections
                .into_iter()
                .map(SelectionResponse::from)
                .collect(),
            total_price: saved.total_price,
            is_favorite: saved.is_favorite,
            created_at: saved.created_at,
        }
    }
}
