use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Quote, QuoteStatus};
use crate::utils::validation::trim_optional;

// Request para crear una cotización
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteRequest {
    pub session_id: Option<String>,

    #[validate(length(max = 200))]
    pub customer_name: Option<String>,

    #[validate(email)]
    pub customer_email: Option<String>,

    #[validate(length(max = 40))]
    pub customer_phone: Option<String>,

    #[validate(length(max = 200))]
    pub customer_company: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl CreateQuoteRequest {
    /// Recorta espacios; los campos en blanco cuentan como ausentes
    pub fn normalized(self) -> Self {
        Self {
            session_id: trim_optional(self.session_id),
            customer_name: trim_optional(self.customer_name),
            customer_email: trim_optional(self.customer_email),
            customer_phone: trim_optional(self.customer_phone),
            customer_company: trim_optional(self.customer_company),
            notes: trim_optional(self.notes),
        }
    }
}

// Response de cotización
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quote_id: Uuid,
    pub quote_number: String,
    pub session_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_company: Option<String>,
    pub status: QuoteStatus,
    pub base_price: Decimal,
    pub destination_charge: Decimal,
    pub total_price: Decimal,
    pub valid_until: DateTime<Utc>,
    pub pdf_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            pdf_url: format!("/api/quotes/{}/pdf", quote.id),
            quote_id: quote.id,
            quote_number: quote.quote_number,
            session_id: quote.session_id,
            customer_name: quote.customer_name,
            customer_email: quote.customer_email,
            customer_phone: quote.customer_phone,
            customer_company: quote.customer_company,
            status: quote.status,
            base_price: quote.base_price,
            destination_charge: quote.destination_charge,
            total_price: quote.total_price,
            valid_until: quote.valid_until,
            created_at: quote.created_at,
        }
    }
}
