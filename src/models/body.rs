//! Modelo de configuración de carrocería (tabla `body_configurations`)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Texto mostrado en lugar de un precio de carrocería
pub const BODY_PRICE_NOTE: &str = "Contact for pricing";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BodyConfig {
    pub id: Uuid,
    pub configuration_name: String,
    pub configuration_code: String,
    pub description: Option<String>,
    pub fuel_type: Option<String>,
    pub length_ft: Option<Decimal>,
    pub passenger_capacity: Option<i32>,
    pub wheelchair_positions: Option<i32>,
    pub electric_range_miles: Option<i32>,
}

impl BodyConfig {
    pub fn passengers(&self) -> i32 {
        self.passenger_capacity.unwrap_or(0)
    }
}
