//! Modelo de Chassis
//!
//! Datos de referencia inmutables de la tabla `chassis`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Chassis del catálogo - mapea a la tabla chassis
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChassisSpec {
    pub id: Uuid,
    pub chassis_code: String,
    pub series: String,
    pub model_year: i32,
    pub wheelbase_inches: i32,
    pub gvwr_lbs: Option<i32>,
    pub engine_type: Option<String>,
    pub fuel_type: Option<String>,
    pub drivetrain: Option<String>,
    pub body_style: Option<String>,
    pub msrp: Option<Decimal>,
    pub destination_charge: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl ChassisSpec {
    /// Nombre comercial, p. ej. `E3F 138" Wheelbase DRW E-350`
    pub fn display_name(&self) -> String {
        format!(
            "{} {}\" Wheelbase {} {}",
            self.series,
            self.wheelbase_inches,
            self.drivetrain.as_deref().unwrap_or_default(),
            self.body_style.as_deref().unwrap_or_default()
        )
        .trim_end()
        .to_string()
    }

    pub fn msrp_or_zero(&self) -> Decimal {
        self.msrp.unwrap_or(Decimal::ZERO)
    }

    pub fn destination_charge_or_zero(&self) -> Decimal {
        self.destination_charge.unwrap_or(Decimal::ZERO)
    }

    pub fn total_price(&self) -> Decimal {
        self.msrp_or_zero() + self.destination_charge_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chassis(msrp: Option<i64>, destination: Option<i64>) -> ChassisSpec {
        ChassisSpec {
            id: Uuid::new_v4(),
            chassis_code: "E3F-138-DRW".to_string(),
            series: "E3F".to_string(),
            model_year: 2024,
            wheelbase_inches: 138,
            gvwr_lbs: Some(10000),
            engine_type: Some("V8 Gas".to_string()),
            fuel_type: Some("Gasoline".to_string()),
            drivetrain: Some("DRW".to_string()),
            body_style: Some("E-350".to_string()),
            msrp: msrp.map(|v| Decimal::new(v, 0)),
            destination_charge: destination.map(|v| Decimal::new(v, 0)),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(chassis(None, None).display_name(), "E3F 138\" Wheelbase DRW E-350");
    }

    #[test]
    fn test_total_price_treats_missing_as_zero() {
        assert_eq!(chassis(Some(41585), Some(2095)).total_price(), Decimal::new(43680, 0));
        assert_eq!(chassis(Some(41585), None).total_price(), Decimal::new(41585, 0));
        assert_eq!(chassis(None, None).total_price(), Decimal::ZERO);
    }
}
