use std::collections::BTreeSet;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::dto::catalog_dto::{
    BodyResponse, CatalogFilters, CatalogQuery, CatalogResponse, ChassisResponse, FilterOptionsResponse, ValueRange,
    DEFAULT_CAPACITY_RANGE, DEFAULT_PRICE_RANGE, WHEELCHAIR_OPTIONS,
};
use crate::repositories::CatalogRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{parse_id, parse_optional_i32};

pub struct CatalogController {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogController {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    pub async fn list_chassis(&self) -> Result<Vec<ChassisResponse>, AppError> {
        let chassis = self.catalog.list_chassis().await?;
        Ok(chassis.into_iter().map(ChassisResponse::from).collect())
    }

    pub async fn get_chassis(&self, id: &str) -> Result<ChassisResponse, AppError> {
        let id = parse_id(id, "Chassis")?;
        let chassis = self
            .catalog
            .find_chassis(id)
            .await?
            .ok_or_else(|| not_found_error("Chassis"))?;

        Ok(ChassisResponse::from(chassis))
    }

    pub async fn list_bodies(&self) -> Result<Vec<BodyResponse>, AppError> {
        let bodies = self.catalog.list_bodies(None).await?;
        Ok(bodies.into_iter().map(BodyResponse::from).collect())
    }

    pub async fn get_body(&self, id: &str) -> Result<BodyResponse, AppError> {
        let id = parse_id(id, "Body configuration")?;
        let body = self
            .catalog
            .find_body(id)
            .await?
            .ok_or_else(|| not_found_error("Body configuration"))?;

        Ok(BodyResponse::from(body))
    }

    /// Valores presentes en el catálogo para poblar los filtros.
    ///
    /// Sin datos, los rangos caen a 14-24 pasajeros y $80,000-$250,000.
    pub async fn filter_options(&self) -> Result<FilterOptionsResponse, AppError> {
        let chassis = self.catalog.list_chassis().await?;
        let bodies = self.catalog.list_bodies(None).await?;

        let fuel_types: BTreeSet<String> = bodies.iter().filter_map(|b| b.fuel_type.clone()).collect();
        let capacities: Vec<i32> = bodies.iter().filter_map(|b| b.passenger_capacity).collect();
        let prices: Vec<Decimal> = chassis
            .iter()
            .filter(|c| c.msrp.is_some())
            .map(|c| c.total_price())
            .collect();
        let series_codes: BTreeSet<String> = chassis.iter().map(|c| c.series.clone()).collect();

        let capacity_range = match (capacities.iter().min(), capacities.iter().max()) {
            (Some(&min), Some(&max)) => ValueRange { min, max },
            _ => ValueRange {
                min: DEFAULT_CAPACITY_RANGE.0,
                max: DEFAULT_CAPACITY_RANGE.1,
            },
        };
        let price_range = match (prices.iter().min(), prices.iter().max()) {
            (Some(&min), Some(&max)) => ValueRange { min, max },
            _ => ValueRange {
                min: Decimal::from(DEFAULT_PRICE_RANGE.0),
                max: Decimal::from(DEFAULT_PRICE_RANGE.1),
            },
        };

        Ok(FilterOptionsResponse {
            fuel_types: fuel_types.into_iter().collect(),
            capacity_range,
            price_range,
            series_codes: series_codes.into_iter().collect(),
            wheelchair_options: WHEELCHAIR_OPTIONS.to_vec(),
        })
    }

    /// Vehículos del catálogo filtrados por combustible y capacidad
    pub async fn search_vehicles(&self, query: CatalogQuery) -> Result<CatalogResponse, AppError> {
        let filters = CatalogFilters {
            // "all" equivale a no filtrar
            fuel_type: query
                .fuel_type
                .filter(|f| !f.trim().is_empty() && !f.eq_ignore_ascii_case("all")),
            min_passengers: parse_optional_i32(query.min_passengers.as_deref()),
            max_passengers: parse_optional_i32(query.max_passengers.as_deref()),
        };

        let bodies = self.catalog.list_bodies(filters.fuel_type.as_deref()).await?;

        let vehicles: Vec<BodyResponse> = bodies
            .into_iter()
            .filter(|body| {
                let passengers = body.passengers();
                filters.min_passengers.map_or(true, |min| passengers >= min)
                    && filters.max_passengers.map_or(true, |max| passengers <= max)
            })
            .map(BodyResponse::catalog_entry)
            .collect();

        tracing::debug!("🔍 Catálogo: {} vehículos con filtros {:?}", vehicles.len(), filters);

        Ok(CatalogResponse {
            total: vehicles.len(),
            vehicles,
            filters,
        })
    }
}
