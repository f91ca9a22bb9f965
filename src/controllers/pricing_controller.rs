use std::sync::Arc;

use crate::dto::pricing_dto::PricingResponse;
use crate::repositories::{CatalogRepository, SessionRepository};
use crate::services::PricingService;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::parse_id;

pub struct PricingController {
    catalog: Arc<dyn CatalogRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl PricingController {
    pub fn new(catalog: Arc<dyn CatalogRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { catalog, sessions }
    }

    /// Precio actual de la sesión. No modifica nada.
    pub async fn get_pricing(&self, session_id: &str) -> Result<PricingResponse, AppError> {
        let id = parse_id(session_id, "Session")?;
        let session = self
            .sessions
            .find_session(id)
            .await?
            .ok_or_else(|| not_found_error("Session"))?;

        let breakdown = PricingService::new(self.catalog.as_ref()).price_session(&session).await?;
        Ok(PricingResponse::new(session.id, breakdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfigurationSession, SessionUpdate};
    use crate::repositories::memory_repository::{InMemoryStore, DEMO_BODY_B4XR_ID, DEMO_CHASSIS_138_ID};
    use chrono::Utc;
    use rust_decimal::Decimal;

    async fn setup(update: SessionUpdate) -> (PricingController, String) {
        let store = Arc::new(InMemoryStore::with_demo_catalog());
        let session = ConfigurationSession::new("token".into(), "customer".into(), Utc::now());
        let session = store.create_session(&session).await.unwrap();
        store.update_session(session.id, &update).await.unwrap();
        (PricingController::new(store.clone(), store), session.id.to_string())
    }

    #[tokio::test]
    async fn test_pricing_with_chassis_and_body() {
        let (controller, id) = setup(SessionUpdate {
            selected_chassis_id: Some(DEMO_CHASSIS_138_ID),
            selected_body_id: Some(DEMO_BODY_B4XR_ID),
            ..Default::default()
        })
        .await;

        let pricing = controller.get_pricing(&id).await.unwrap();
        assert_eq!(pricing.chassis_price, Decimal::new(41585, 0));
        assert_eq!(pricing.destination_charge, Decimal::new(2095, 0));
        assert_eq!(pricing.body_price, Decimal::ZERO);
        assert_eq!(pricing.total_price, Decimal::new(43680, 0));
        assert_eq!(pricing.breakdown.body.note, Some("Contact for pricing"));

        // Idempotente
        let again = controller.get_pricing(&id).await.unwrap();
        assert_eq!(again.total_price, pricing.total_price);
    }

    #[tokio::test]
    async fn test_pricing_unknown_session() {
        let (controller, _) = setup(SessionUpdate::default()).await;
        let missing = uuid::Uuid::new_v4().to_string();
        assert!(matches!(controller.get_pricing(&missing).await, Err(AppError::NotFound(_))));
    }
}
