use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::body::BODY_PRICE_NOTE;
use crate::services::pricing_service::PriceBreakdown;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChassisPriceDetail {
    pub msrp: Decimal,
    pub destination_charge: Decimal,
}

#[derive(Debug, Serialize)]
pub struct BodyPriceDetail {
    pub price: Decimal,
    pub note: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct BreakdownDetail {
    pub chassis: ChassisPriceDetail,
    pub body: BodyPriceDetail,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

// Response de precios de una sesión
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub session_id: Uuid,
    pub chassis_price: Decimal,
    pub body_price: Decimal,
    pub destination_charge: Decimal,
    pub total_price: Decimal,
    pub breakdown: BreakdownDetail,
}

impl PricingResponse {
    pub fn new(session_id: Uuid, breakdown: PriceBreakdown) -> Self {
        Self {
            session_id,
            chassis_price: breakdown.chassis_price,
            body_price: breakdown.body_price,
            destination_charge: breakdown.destination_charge,
            total_price: breakdown.total_price,
            breakdown: BreakdownDetail {
                chassis: ChassisPriceDetail {
                    msrp: breakdown.chassis_price,
                    destination_charge: breakdown.destination_charge,
                },
                body: BodyPriceDetail {
                    price: breakdown.body_price,
                    note: breakdown.body_selected.then_some(BODY_PRICE_NOTE),
                },
                warnings: breakdown.warnings,
            },
        }
    }
}
