use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{BodyConfig, ChassisSpec};
use crate::utils::errors::AppError;

/// Lectura del catálogo de chassis y carrocerías
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_chassis(&self) -> Result<Vec<ChassisSpec>, AppError>;

    async fn find_chassis(&self, id: Uuid) -> Result<Option<ChassisSpec>, AppError>;

    /// Carrocerías, opcionalmente filtradas por tipo de combustible
    async fn list_bodies(&self, fuel_type: Option<&str>) -> Result<Vec<BodyConfig>, AppError>;

    async fn find_body(&self, id: Uuid) -> Result<Option<BodyConfig>, AppError>;
}

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_chassis(&self) -> Result<Vec<ChassisSpec>, AppError> {
        let chassis = sqlx::query_as::<_, ChassisSpec>(
            r#"
            SELECT id, chassis_code, series, model_year, wheelbase_inches, gvwr_lbs,
                   engine_type, fuel_type, drivetrain, body_style, msrp,
                   destination_charge, created_at
            FROM chassis
            ORDER BY series, wheelbase_inches
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error listing chassis: {}", e)))?;

        Ok(chassis)
    }

    async fn find_chassis(&self, id: Uuid) -> Result<Option<ChassisSpec>, AppError> {
        let chassis = sqlx::query_as::<_, ChassisSpec>(
            r#"
            SELECT id, chassis_code, series, model_year, wheelbase_inches, gvwr_lbs,
                   engine_type, fuel_type, drivetrain, body_style, msrp,
                   destination_charge, created_at
            FROM chassis
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error finding chassis: {}", e)))?;

        Ok(chassis)
    }

    async fn list_bodies(&self, fuel_type: Option<&str>) -> Result<Vec<BodyConfig>, AppError> {
        let bodies = sqlx::query_as::<_, BodyConfig>(
            r#"
            SELECT id, configuration_name, configuration_code, description, fuel_type,
                   length_ft, passenger_capacity, wheelchair_positions, electric_range_miles
            FROM body_configurations
            WHERE ($1::text IS NULL OR fuel_type = $1)
            ORDER BY configuration_name
            "#,
        )
        .bind(fuel_type)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error listing body configurations: {}", e)))?;

        Ok(bodies)
    }

    async fn find_body(&self, id: Uuid) -> Result<Option<BodyConfig>, AppError> {
        let body = sqlx::query_as::<_, BodyConfig>(
            r#"
            SELECT id, configuration_name, configuration_code, description, fuel_type,
                   length_ft, passenger_capacity, wheelchair_positions, electric_range_miles
            FROM body_configurations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error finding body configuration: {}", e)))?;

        Ok(body)
    }
}
