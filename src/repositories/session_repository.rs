use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ConfigurationSession, NewSelection, Selection, SessionUpdate};
use crate::utils::errors::AppError;

/// Almacén de sesiones de configuración y sus selecciones
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(&self, session: &ConfigurationSession) -> Result<ConfigurationSession, AppError>;

    async fn find_session(&self, id: Uuid) -> Result<Option<ConfigurationSession>, AppError>;

    /// Aplica los cambios y devuelve la sesión resultante, `None` si no existe
    async fn update_session(
        &self,
        id: Uuid,
        update: &SessionUpdate,
    ) -> Result<Option<ConfigurationSession>, AppError>;

    async fn insert_selection(&self, session_id: Uuid, selection: NewSelection) -> Result<Selection, AppError>;

    async fn list_selections(&self, session_id: Uuid) -> Result<Vec<Selection>, AppError>;

    /// `true` si se borró una fila
    async fn delete_selection(&self, session_id: Uuid, selection_id: Uuid) -> Result<bool, AppError>;
}

// Filas tal cual vienen de PostgreSQL; los enums se guardan como texto
#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    session_token: String,
    user_type: String,
    current_step: String,
    session_status: String,
    selected_chassis_id: Option<Uuid>,
    selected_body_id: Option<Uuid>,
    base_price: Option<Decimal>,
    options_price: Option<Decimal>,
    total_price: Option<Decimal>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TryFrom<SessionRow> for ConfigurationSession {
    type Error = AppError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            session_token: row.session_token,
            user_type: row.user_type,
            current_step: row.current_step.parse().map_err(AppError::InvalidState)?,
            status: row.session_status.parse().map_err(AppError::InvalidState)?,
            selected_chassis_id: row.selected_chassis_id,
            selected_body_id: row.selected_body_id,
            base_price: row.base_price,
            options_price: row.options_price,
            total_price: row.total_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
            expires_at: row.expires_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SelectionRow {
    id: Uuid,
    session_id: Uuid,
    selection_type: String,
    selected_item_id: String,
    selected_item_code: Option<String>,
    quantity: i32,
    unit_price: Option<Decimal>,
    total_price: Option<Decimal>,
    is_valid: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<SelectionRow> for Selection {
    type Error = AppError;

    fn try_from(row: SelectionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            session_id: row.session_id,
            selection_type: row.selection_type.parse().map_err(AppError::InvalidState)?,
            selected_item_id: row.selected_item_id,
            selected_item_code: row.selected_item_code,
            quantity: row.quantity,
            unit_price: row.unit_price,
            total_price: row.total_price,
            is_valid: row.is_valid,
            created_at: row.created_at,
        })
    }
}

pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create_session(&self, session: &ConfigurationSession) -> Result<ConfigurationSession, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO configuration_sessions (
                id, session_token, user_type, current_step, session_status,
                selected_chassis_id, selected_body_id, base_price, options_price,
                total_price, created_at, updated_at, expires_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(session.id)
        .bind(&session.session_token)
        .bind(&session.user_type)
        .bind(session.current_step.as_str())
        .bind(session.status.as_str())
        .bind(session.selected_chassis_id)
        .bind(session.selected_body_id)
        .bind(session.base_price)
        .bind(session.options_price)
        .bind(session.total_price)
        .bind(session.created_at)
        .bind(session.updated_at)
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error creating session: {}", e)))?;

        log::debug!("💾 Sesión {} insertada", row.id);
        row.try_into()
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<ConfigurationSession>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>("SELECT * FROM configuration_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Storage(format!("Error finding session: {}", e)))?;

        row.map(ConfigurationSession::try_from).transpose()
    }

    async fn update_session(
        &self,
        id: Uuid,
        update: &SessionUpdate,
    ) -> Result<Option<ConfigurationSession>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            UPDATE configuration_sessions
            SET current_step = COALESCE($2, current_step),
                session_status = COALESCE($3, session_status),
                selected_chassis_id = COALESCE($4, selected_chassis_id),
                selected_body_id = COALESCE($5, selected_body_id),
                base_price = COALESCE($6, base_price),
                options_price = COALESCE($7, options_price),
                total_price = COALESCE($8, total_price),
                updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.current_step.map(|s| s.as_str()))
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.selected_chassis_id)
        .bind(update.selected_body_id)
        .bind(update.base_price)
        .bind(update.options_price)
        .bind(update.total_price)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error updating session: {}", e)))?;

        row.map(ConfigurationSession::try_from).transpose()
    }

    async fn insert_selection(&self, session_id: Uuid, selection: NewSelection) -> Result<Selection, AppError> {
        let selection = selection.into_selection(session_id, Utc::now());

        let row = sqlx::query_as::<_, SelectionRow>(
            r#"
            INSERT INTO configuration_selections (
                id, session_id, selection_type, selected_item_id, selected_item_code,
                quantity, unit_price, total_price, is_valid, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(selection.id)
        .bind(selection.session_id)
        .bind(selection.selection_type.as_str())
        .bind(&selection.selected_item_id)
        .bind(&selection.selected_item_code)
        .bind(selection.quantity)
        .bind(selection.unit_price)
        .bind(selection.total_price)
        .bind(selection.is_valid)
        .bind(selection.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error creating selection: {}", e)))?;

        row.try_into()
    }

    async fn list_selections(&self, session_id: Uuid) -> Result<Vec<Selection>, AppError> {
        let rows = sqlx::query_as::<_, SelectionRow>(
            "SELECT * FROM configuration_selections WHERE session_id = $1 ORDER BY created_at ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error listing selections: {}", e)))?;

        rows.into_iter().map(Selection::try_from).collect()
    }

    async fn delete_selection(&self, session_id: Uuid, selection_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM configuration_selections WHERE id = $1 AND session_id = $2")
            .bind(selection_id)
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Storage(format!("Error deleting selection: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
