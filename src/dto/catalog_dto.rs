use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::body::BODY_PRICE_NOTE;
use crate::models::{BodyConfig, ChassisSpec};

const PLACEHOLDER_IMAGE: &str = "/api/placeholder/400/300";

// Response de chassis
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChassisResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub series: String,
    pub model_year: i32,
    pub wheelbase: i32,
    pub gvwr: Option<i32>,
    pub engine: Option<String>,
    pub fuel_type: Option<String>,
    pub drivetrain: Option<String>,
    pub body_style: Option<String>,
    pub msrp: Decimal,
    pub destination_charge: Decimal,
    pub total_price: Decimal,
}

impl From<ChassisSpec> for ChassisResponse {
    fn from(chassis: ChassisSpec) -> Self {
        Self {
            name: chassis.display_name(),
            msrp: chassis.msrp_or_zero(),
            destination_charge: chassis.destination_charge_or_zero(),
            total_price: chassis.total_price(),
            id: chassis.id,
            code: chassis.chassis_code,
            series: chassis.series,
            model_year: chassis.model_year,
            wheelbase: chassis.wheelbase_inches,
            gvwr: chassis.gvwr_lbs,
            engine: chassis.engine_type,
            fuel_type: chassis.fuel_type,
            drivetrain: chassis.drivetrain,
            body_style: chassis.body_style,
        }
    }
}

// Response de carrocería
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyResponse {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub fuel_type: Option<String>,
    pub length: Option<Decimal>,
    pub passengers: Option<i32>,
    pub wheelchair_positions: Option<i32>,
    pub range: Option<i32>,
    pub price: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'static str>,
}

impl From<BodyConfig> for BodyResponse {
    fn from(body: BodyConfig) -> Self {
        Self {
            id: body.id,
            name: body.configuration_name,
            code: body.configuration_code,
            description: body.description,
            fuel_type: body.fuel_type,
            length: body.length_ft,
            passengers: body.passenger_capacity,
            wheelchair_positions: body.wheelchair_positions,
            range: body.electric_range_miles,
            price: BODY_PRICE_NOTE,
            image: None,
        }
    }
}

impl BodyResponse {
    /// Variante del catálogo con imagen de marcador
    pub fn catalog_entry(body: BodyConfig) -> Self {
        Self {
            image: Some(PLACEHOLDER_IMAGE),
            ..Self::from(body)
        }
    }
}

/// Filtros del catálogo. Se reciben como texto y los números inválidos se ignoran.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    pub fuel_type: Option<String>,
    pub min_passengers: Option<String>,
    pub max_passengers: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilters {
    pub fuel_type: Option<String>,
    pub min_passengers: Option<i32>,
    pub max_passengers: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub vehicles: Vec<BodyResponse>,
    pub total: usize,
    pub filters: CatalogFilters,
}

pub const DEFAULT_CAPACITY_RANGE: (i32, i32) = (14, 24);
pub const DEFAULT_PRICE_RANGE: (i64, i64) = (80_000, 250_000);
pub const WHEELCHAIR_OPTIONS: [i32; 3] = [0, 1, 2];

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

// Opciones disponibles para construir los filtros del catálogo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsResponse {
    pub fuel_types: Vec<String>,
    pub capacity_range: ValueRange<i32>,
    pub price_range: ValueRange<Decimal>,
    pub series_codes: Vec<String>,
    pub wheelchair_options: Vec<i32>,
}
