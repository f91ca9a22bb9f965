//! Guardar y compartir configuraciones
//!
//! Guardar congela los punteros, las selecciones y el precio actual de la
//! sesión. El enlace compartido sigue mostrando esa foto aunque la sesión cambie.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::saved_configuration_dto::{
    SaveConfigurationRequest, SaveConfigurationResponse, SharedConfigurationResponse,
};
use crate::models::{SavedConfiguration, SavedConfigurationData};
use crate::repositories::{CatalogRepository, SavedConfigurationRepository, SessionRepository};
use crate::services::PricingService;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::token::random_hex_token;
use crate::utils::validation::{parse_id, require_field};

pub struct SavedConfigurationController {
    catalog: Arc<dyn CatalogRepository>,
    sessions: Arc<dyn SessionRepository>,
    saved: Arc<dyn SavedConfigurationRepository>,
}

impl SavedConfigurationController {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        sessions: Arc<dyn SessionRepository>,
        saved: Arc<dyn SavedConfigurationRepository>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            saved,
        }
    }

    pub async fn save_configuration(
        &self,
        request: SaveConfigurationRequest,
    ) -> Result<SaveConfigurationResponse, AppError> {
        let request = request.normalized();
        let session_id = require_field(request.session_id.clone(), "sessionId")?;
        let configuration_name = require_field(request.configuration_name.clone(), "configurationName")?;
        request.validate()?;

        let session_id = parse_id(&session_id, "Session")?;
        let session = self
            .sessions
            .find_session(session_id)
            .await?
            .ok_or_else(|| not_found_error("Session"))?;

        let selections = self.sessions.list_selections(session.id).await?;
        let breakdown = PricingService::new(self.catalog.as_ref()).price_session(&session).await?;

        let saved = SavedConfiguration {
            id: Uuid::new_v4(),
            configuration_name,
            user_email: request.user_email,
            session_id: session.id,
            configuration_data: SavedConfigurationData {
                chassis_id: session.selected_chassis_id,
                body_id: session.selected_body_id,
                selections,
            },
            total_price: breakdown.total_price,
            is_favorite: request.is_favorite,
            share_token: random_hex_token(),
            created_at: Utc::now(),
        };
        let saved = self.saved.save_configuration(&saved).await?;

        tracing::info!(
            "⭐ Configuración {} guardada desde sesión {} ({} selecciones)",
            saved.id,
            session.id,
            saved.configuration_data.selections.len()
        );
        Ok(SaveConfigurationResponse::from(&saved))
    }

    pub async fn get_shared(&self, share_token: &str) -> Result<SharedConfigurationResponse, AppError> {
        let saved = self
            .saved
            .find_by_share_token(share_token.trim())
            .await?
            .ok_or_else(|| not_found_error("Configuration"))?;

        Ok(SharedConfigurationResponse::from(saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfigurationSession, NewSelection, SelectionType, SessionUpdate};
    use crate::repositories::memory_repository::{InMemoryStore, DEMO_BODY_B4XR_ID, DEMO_CHASSIS_158_ID};
    use rust_decimal::Decimal;

    async fn setup() -> (SavedConfigurationController, Arc<InMemoryStore>, Uuid) {
        let store = Arc::new(InMemoryStore::with_demo_catalog());
        let session = ConfigurationSession::new("token".into(), "customer".into(), Utc::now());
        let session = store.create_session(&session).await.unwrap();
        store
            .update_session(
                session.id,
                &SessionUpdate {
                    selected_chassis_id: Some(DEMO_CHASSIS_158_ID),
                    selected_body_id: Some(DEMO_BODY_B4XR_ID),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store
            .insert_selection(
                session.id,
                NewSelection {
                    selection_type: SelectionType::Option,
                    selected_item_id: "AC".into(),
                    selected_item_code: None,
                    quantity: 1,
                    unit_price: None,
                    total_price: None,
                },
            )
            .await
            .unwrap();
        let controller = SavedConfigurationController::new(store.clone(), store.clone(), store.clone());
        (controller, store, session.id)
    }

    fn request(session_id: Uuid) -> SaveConfigurationRequest {
        SaveConfigurationRequest {
            session_id: Some(session_id.to_string()),
            configuration_name: Some("Airport shuttle".into()),
            user_email: Some(" fleet@example.com ".into()),
            is_favorite: true,
        }
    }

    #[tokio::test]
    async fn test_save_then_open_shared_link() {
        let (controller, store, session_id) = setup().await;
        let saved = controller.save_configuration(request(session_id)).await.unwrap();

        assert_eq!(saved.share_token.len(), 64);
        assert_eq!(saved.share_url, format!("/api/configurations/shared/{}", saved.share_token));

        let stored = store.find_by_share_token(&saved.share_token).await.unwrap().unwrap();
        assert_eq!(stored.user_email.as_deref(), Some("fleet@example.com"));

        let shared = controller.get_shared(&saved.share_token).await.unwrap();
        assert_eq!(shared.configuration_id, saved.configuration_id);
        assert_eq!(shared.chassis_id, Some(DEMO_CHASSIS_158_ID));
        assert_eq!(shared.body_id, Some(DEMO_BODY_B4XR_ID));
        assert_eq!(shared.selections.len(), 1);
        assert_eq!(shared.total_price, Decimal::new(44425, 0));
        assert!(shared.is_favorite);
    }

    #[tokio::test]
    async fn test_shared_link_is_a_snapshot() {
        let (controller, store, session_id) = setup().await;
        let saved = controller.save_configuration(request(session_id)).await.unwrap();

        store
            .update_session(
                session_id,
                &SessionUpdate {
                    selected_chassis_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let shared = controller.get_shared(&saved.share_token).await.unwrap();
        assert_eq!(shared.chassis_id, Some(DEMO_CHASSIS_158_ID));
    }

    #[tokio::test]
    async fn test_save_requires_session_and_name() {
        let (controller, _, session_id) = setup().await;

        let mut unnamed = request(session_id);
        unnamed.configuration_name = Some("  ".into());
        match controller.save_configuration(unnamed).await {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Missing required field: configurationName"),
            other => panic!("unexpected result: {:?}", other.map(|s| s.configuration_id)),
        }

        let mut bad_email = request(session_id);
        bad_email.user_email = Some("fleet".into());
        assert!(matches!(
            controller.save_configuration(bad_email).await,
            Err(AppError::Validation(_))
        ));

        assert!(matches!(
            controller.save_configuration(request(Uuid::new_v4())).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_share_token() {
        let (controller, _, _) = setup().await;
        match controller.get_shared("missing").await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Configuration not found"),
            other => panic!("unexpected result: {:?}", other.map(|s| s.configuration_id)),
        }
    }
}
