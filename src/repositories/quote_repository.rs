use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Quote;
use crate::utils::errors::AppError;

/// Almacén de cotizaciones
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Siguiente valor de la secuencia de números de cotización, estrictamente creciente
    async fn next_quote_sequence(&self) -> Result<i64, AppError>;

    async fn create_quote(&self, quote: &Quote) -> Result<Quote, AppError>;

    async fn find_quote(&self, id: Uuid) -> Result<Option<Quote>, AppError>;
}

#[derive(Debug, sqlx::FromRow)]
struct QuoteRow {
    id: Uuid,
    session_id: Uuid,
    quote_number: String,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    customer_company: Option<String>,
    notes: Option<String>,
    quote_type: String,
    quote_status: String,
    base_price: Decimal,
    destination_charge: Decimal,
    total_price: Decimal,
    valid_until: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<QuoteRow> for Quote {
    type Error = AppError;

    fn try_from(row: QuoteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            session_id: row.session_id,
            quote_number: row.quote_number,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            customer_company: row.customer_company,
            notes: row.notes,
            quote_type: row.quote_type,
            status: row.quote_status.parse().map_err(AppError::InvalidState)?,
            base_price: row.base_price,
            destination_charge: row.destination_charge,
            total_price: row.total_price,
            valid_until: row.valid_until,
            created_at: row.created_at,
        })
    }
}

pub struct PgQuoteRepository {
    pool: PgPool,
}

impl PgQuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuoteRepository for PgQuoteRepository {
    async fn next_quote_sequence(&self) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT nextval('quote_number_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Storage(format!("Error allocating quote number: {}", e)))?;

        Ok(result.0)
    }

    async fn create_quote(&self, quote: &Quote) -> Result<Quote, AppError> {
        let row = sqlx::query_as::<_, QuoteRow>(
            r#"
            INSERT INTO quotes (
                id, session_id, quote_number, customer_name, customer_email,
                customer_phone, customer_company, notes, quote_type, quote_status,
                base_price, destination_charge, total_price, valid_until, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(quote.id)
        .bind(quote.session_id)
        .bind(&quote.quote_number)
        .bind(&quote.customer_name)
        .bind(&quote.customer_email)
        .bind(&quote.customer_phone)
        .bind(&quote.customer_company)
        .bind(&quote.notes)
        .bind(&quote.quote_type)
        .bind(quote.status.as_str())
        .bind(quote.base_price)
        .bind(quote.destination_charge)
        .bind(quote.total_price)
        .bind(quote.valid_until)
        .bind(quote.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Storage(format!("Error creating quote: {}", e)))?;

        log::debug!("💾 Cotización {} insertada", row.quote_number);
        row.try_into()
    }

    async fn find_quote(&self, id: Uuid) -> Result<Option<Quote>, AppError> {
        let row = sqlx::query_as::<_, QuoteRow>("SELECT * FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Storage(format!("Error finding quote: {}", e)))?;

        row.map(Quote::try_from).transpose()
    }
}
