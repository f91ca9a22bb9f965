//! Almacén en memoria
//!
//! Implementa los cuatro repositorios sobre mapas protegidos con `RwLock`.
//! Se usa en tests y en el modo demo (sin `DATABASE_URL`), sembrado
//! con el catálogo de demostración.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    BodyConfig, ChassisSpec, ConfigurationSession, NewSelection, Quote, SavedConfiguration, Selection,
    SessionUpdate,
};
use crate::repositories::{CatalogRepository, QuoteRepository, SavedConfigurationRepository, SessionRepository};
use crate::utils::errors::AppError;

pub const DEMO_CHASSIS_138_ID: Uuid = Uuid::from_u128(0x6f1c_2a0e_0b1d_4c55_9a61_0000_0000_0138);
pub const DEMO_CHASSIS_158_ID: Uuid = Uuid::from_u128(0x6f1c_2a0e_0b1d_4c55_9a61_0000_0000_0158);
pub const DEMO_BODY_B4XR_ID: Uuid = Uuid::from_u128(0x8d3e_51b2_77a4_4f0c_b2c9_0000_0000_b4c0);
pub const DEMO_BODY_B5SR_ID: Uuid = Uuid::from_u128(0x8d3e_51b2_77a4_4f0c_b2c9_0000_0000_b5c0);

pub struct InMemoryStore {
    chassis: RwLock<Vec<ChassisSpec>>,
    bodies: RwLock<Vec<BodyConfig>>,
    sessions: RwLock<HashMap<Uuid, ConfigurationSession>>,
    selections: RwLock<Vec<Selection>>,
    quotes: RwLock<HashMap<Uuid, Quote>>,
    quote_sequence: AtomicI64,
    saved: RwLock<HashMap<String, SavedConfiguration>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_catalog(Vec::new(), Vec::new())
    }
}

impl InMemoryStore {
    pub fn with_catalog(chassis: Vec<ChassisSpec>, bodies: Vec<BodyConfig>) -> Self {
        Self {
            chassis: RwLock::new(chassis),
            bodies: RwLock::new(bodies),
            sessions: RwLock::new(HashMap::new()),
            selections: RwLock::new(Vec::new()),
            quotes: RwLock::new(HashMap::new()),
            quote_sequence: AtomicI64::new(0),
            saved: RwLock::new(HashMap::new()),
        }
    }

    /// Catálogo de demostración: dos chassis E-350 y dos carrocerías eléctricas
    pub fn with_demo_catalog() -> Self {
        let now = Utc::now();
        let chassis = vec![
            ChassisSpec {
                id: DEMO_CHASSIS_138_ID,
                chassis_code: "E3F-138-DRW".to_string(),
                series: "E3F".to_string(),
                model_year: 2024,
                wheelbase_inches: 138,
                gvwr_lbs: Some(10000),
                engine_type: Some("V8 Gas".to_string()),
                fuel_type: Some("Gasoline".to_string()),
                drivetrain: Some("DRW".to_string()),
                body_style: Some("E-350".to_string()),
                msrp: Some(Decimal::new(41585, 0)),
                destination_charge: Some(Decimal::new(2095, 0)),
                created_at: now,
            },
            ChassisSpec {
                id: DEMO_CHASSIS_158_ID,
                chassis_code: "E3F-158-DRW".to_string(),
                series: "E3F".to_string(),
                model_year: 2024,
                wheelbase_inches: 158,
                gvwr_lbs: Some(10000),
                engine_type: Some("V8 Gas".to_string()),
                fuel_type: Some("Gasoline".to_string()),
                drivetrain: Some("DRW".to_string()),
                body_style: Some("E-350".to_string()),
                msrp: Some(Decimal::new(42330, 0)),
                destination_charge: Some(Decimal::new(2095, 0)),
                created_at: now,
            },
        ];
        let bodies = vec![
            BodyConfig {
                id: DEMO_BODY_B4XR_ID,
                configuration_name: "B4 XR - 24ft Electric Extended Range".to_string(),
                configuration_code: "B4XR-CONFIG".to_string(),
                description: Some("Electric shuttle with extended range capability".to_string()),
                fuel_type: Some("Electric".to_string()),
                length_ft: Some(Decimal::new(24, 0)),
                passenger_capacity: Some(18),
                wheelchair_positions: Some(2),
                electric_range_miles: Some(150),
            },
            BodyConfig {
                id: DEMO_BODY_B5SR_ID,
                configuration_name: "B5 SR - 25ft Electric Standard Range".to_string(),
                configuration_code: "B5SR-CONFIG".to_string(),
                description: Some("Electric shuttle with standard range".to_string()),
                fuel_type: Some("Electric".to_string()),
                length_ft: Some(Decimal::new(25, 0)),
                passenger_capacity: Some(20),
                wheelchair_positions: Some(2),
                electric_range_miles: Some(105),
            },
        ];
        Self::with_catalog(chassis, bodies)
    }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn list_chassis(&self) -> Result<Vec<ChassisSpec>, AppError> {
        let mut chassis = self.chassis.read().await.clone();
        chassis.sort_by(|a, b| {
            a.series
                .cmp(&b.series)
                .then(a.wheelbase_inches.cmp(&b.wheelbase_inches))
        });
        Ok(chassis)
    }

    async fn find_chassis(&self, id: Uuid) -> Result<Option<ChassisSpec>, AppError> {
        Ok(self.chassis.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn list_bodies(&self, fuel_type: Option<&str>) -> Result<Vec<BodyConfig>, AppError> {
        let mut bodies: Vec<BodyConfig> = self
            .bodies
            .read()
            .await
            .iter()
            .filter(|b| match fuel_type {
                Some(fuel) => b.fuel_type.as_deref() == Some(fuel),
                None => true,
            })
            .cloned()
            .collect();
        bodies.sort_by(|a, b| a.configuration_name.cmp(&b.configuration_name));
        Ok(bodies)
    }

    async fn find_body(&self, id: Uuid) -> Result<Option<BodyConfig>, AppError> {
        Ok(self.bodies.read().await.iter().find(|b| b.id == id).cloned())
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn create_session(&self, session: &ConfigurationSession) -> Result<ConfigurationSession, AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(AppError::Storage(format!("Duplicate session id {}", session.id)));
        }
        sessions.insert(session.id, session.clone());
        Ok(session.clone())
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<ConfigurationSession>, AppError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn update_session(
        &self,
        id: Uuid,
        update: &SessionUpdate,
    ) -> Result<Option<ConfigurationSession>, AppError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.get_mut(&id).map(|session| {
            update.apply(session, Utc::now());
            session.clone()
        }))
    }

    async fn insert_selection(&self, session_id: Uuid, selection: NewSelection) -> Result<Selection, AppError> {
        let selection = selection.into_selection(session_id, Utc::now());
        self.selections.write().await.push(selection.clone());
        Ok(selection)
    }

    async fn list_selections(&self, session_id: Uuid) -> Result<Vec<Selection>, AppError> {
        Ok(self
            .selections
            .read()
            .await
            .iter()
            .filter(|s| s.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn delete_selection(&self, session_id: Uuid, selection_id: Uuid) -> Result<bool, AppError> {
        let mut selections = self.selections.write().await;
        let before = selections.len();
        selections.retain(|s| !(s.id == selection_id && s.session_id == session_id));
        Ok(selections.len() < before)
    }
}

#[async_trait]
impl QuoteRepository for InMemoryStore {
    async fn next_quote_sequence(&self) -> Result<i64, AppError> {
        Ok(self.quote_sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn create_quote(&self, quote: &Quote) -> Result<Quote, AppError> {
        self.quotes.write().await.insert(quote.id, quote.clone());
        Ok(quote.clone())
    }

    async fn find_quote(&self, id: Uuid) -> Result<Option<Quote>, AppError> {
        Ok(self.quotes.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl SavedConfigurationRepository for InMemoryStore {
    async fn save_configuration(&self, saved: &SavedConfiguration) -> Result<SavedConfiguration, AppError> {
        let mut configurations = self.saved.write().await;
        if configurations.contains_key(&saved.share_token) {
            return Err(AppError::Storage("Duplicate share token".to_string()));
        }
        configurations.insert(saved.share_token.clone(), saved.clone());
        Ok(saved.clone())
    }

    async fn find_by_share_token(&self, share_token: &str) -> Result<Option<SavedConfiguration>, AppError> {
        Ok(self.saved.read().await.get(share_token).cloned())
    }
}
