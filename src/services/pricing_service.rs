//! Servicio de precios
//!
//! El cálculo es una función pura sobre la sesión y el chassis ya buscado.
//! El precio de la carrocería es siempre 0 ("Contact for pricing") y un
//! chassis inexistente se cotiza en 0 con una advertencia, nunca como error.

use rust_decimal::Decimal;

use crate::models::{ChassisSpec, ConfigurationSession};
use crate::repositories::CatalogRepository;
use crate::utils::errors::AppResult;

/// Desglose de precios de una sesión
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub chassis_price: Decimal,
    pub destination_charge: Decimal,
    pub body_price: Decimal,
    pub total_price: Decimal,
    pub body_selected: bool,
    pub warnings: Vec<String>,
}

/// Calcular precios a partir de la sesión y su chassis (si se encontró)
pub fn compute_price(session: &ConfigurationSession, chassis: Option<&ChassisSpec>) -> PriceBreakdown {
    let mut warnings = Vec::new();

    let (chassis_price, destination_charge) = match (session.selected_chassis_id, chassis) {
        (None, _) => (Decimal::ZERO, Decimal::ZERO),
        (Some(_), Some(chassis)) => (chassis.msrp_or_zero(), chassis.destination_charge_or_zero()),
        (Some(chassis_id), None) => {
            warnings.push(format!("Chassis {} not found in catalog; priced at 0", chassis_id));
            (Decimal::ZERO, Decimal::ZERO)
        }
    };

    // Precio de carrocería pendiente de contacto comercial
    let body_price = Decimal::ZERO;

    PriceBreakdown {
        chassis_price,
        destination_charge,
        body_price,
        total_price: chassis_price + destination_charge + body_price,
        body_selected: session.selected_body_id.is_some(),
        warnings,
    }
}

pub struct PricingService<'a> {
    catalog: &'a dyn CatalogRepository,
}

impl<'a> PricingService<'a> {
    pub fn new(catalog: &'a dyn CatalogRepository) -> Self {
        Self { catalog }
    }

    /// Buscar el chassis de la sesión y calcular el desglose
    pub async fn price_session(&self, session: &ConfigurationSession) -> AppResult<PriceBreakdown> {
        let chassis = match session.selected_chassis_id {
            Some(id) => self.catalog.find_chassis(id).await?,
            None => None,
        };

        let breakdown = compute_price(session, chassis.as_ref());
        for warning in &breakdown.warnings {
            tracing::warn!("⚠️ Sesión {}: {}", session.id, warning);
        }
        Ok(breakdown)
    }
}
