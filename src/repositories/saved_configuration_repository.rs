use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{SavedConfiguration, SavedConfigurationData};
use crate::utils::errors::AppError;

/// Almacén de configuraciones guardadas
#[async_trait]
pub trait SavedConfigurationRepository: Send + Sync {
    async fn save_configuration(&self, saved: &SavedConfiguration) -> Result<SavedConfiguration, AppError>;

    async fn find_by_share_token(&self, share_token: &str) -> Result<Option<SavedConfiguration>, AppError>;
}

#[derive(Debug, sqlx::FromRow)]
struct SavedConfigurationRow {
    id: Uuid,
    configuration_name: String,
    user_email: Option<String>,
    session_id: Uuid,
    configuration_data: Json<SavedConfigurationData>,
    total_price: Decimal,
    is_favorite: bool,
    share_token: String,
    created_at: DateTime<Utc>,
}

impl From<SavedConfigurationRow> for SavedConfiguration {
    fn from(row: SavedConfigurationRow) -> Self {
        Self {
            id: row.id,
            configuration_name: row.configuration_name,
            user_email: row.user_email,
            session_id: row.session_id,
            configuration_data: row.configuration_data.0,
            total_price: row.total_price,
            is_favorite: row.is_favorite,
            share_token: row.share_token,
            created_at: row.created_at,
        }
    }
}

pub struct PgSavedConfigurationRepository {
    pool: PgPool,
}

impl PgSavedConfigurationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SavedConfigurationRepository for PgSavedConfigurationRepository {
    async fn save_configuration(&self, saved: &SavedConfiguration) -> Result<SavedConfiguration, AppError> {
        let row = sqlx::query_as::<_, SavedConfigurationRow>(
            r#"
            INSERT INTO saved_configurations (
                id, configuration_name, user_email, session_id, configuration_data,
                total_price, is_favorite, share_token, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(saved.id)
        .bind(&saved.configuration_name)
        .bind(&saved.user_email)
        .bind(saved.session_id)
        .bind(Json(&saved.configuration_data))
        .bind(saved.total_price)
        .bind(saved.is_favorite)
        .bind(&saved.share_token)
        .bind(saved.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error saving configuration: {}", e)))?;

        log::debug!("💾 Configuración {} guardada", row.id);
        Ok(row.into())
    }

    async fn find_by_share_token(&self, share_token: &str) -> Result<Option<SavedConfiguration>, AppError> {
        let row = sqlx::query_as::<_, SavedConfigurationRow>(
            "SELECT * FROM saved_configurations WHERE share_token = $1",
        )
        .bind(share_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error finding shared configuration: {}", e)))?;

        Ok(row.map(SavedConfiguration::from))
    }
}
