//! Modelo de cotización
//!
//! Una cotización es una foto del precio de una sesión dirigida a un cliente.
//! Se crea una sola vez y es inmutable salvo por su estado.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vigencia fija de una cotización
pub const QUOTE_VALIDITY_DAYS: i64 = 30;

/// Prefijo de los números de cotización
pub const QUOTE_NUMBER_PREFIX: &str = "ENQ";

pub const QUOTE_TYPE_ESTIMATE: &str = "estimate";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Accepted,
    Expired,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "draft",
            QuoteStatus::Sent => "sent",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(QuoteStatus::Draft),
            "sent" => Ok(QuoteStatus::Sent),
            "accepted" => Ok(QuoteStatus::Accepted),
            "expired" => Ok(QuoteStatus::Expired),
            other => Err(format!("Unknown quote status: {}", other)),
        }
    }
}

/// Cotización - mapea a la tabla quotes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub session_id: Uuid,
    pub quote_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_company: Option<String>,
    pub notes: Option<String>,
    pub quote_type: String,
    pub status: QuoteStatus,
    pub base_price: Decimal,
    pub destination_charge: Decimal,
    pub total_price: Decimal,
    pub valid_until: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Datos del cliente para una cotización nueva
#[derive(Debug, Clone)]
pub struct CustomerContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

impl Quote {
    pub fn draft(
        session_id: Uuid,
        quote_number: String,
        customer: CustomerContact,
        base_price: Decimal,
        destination_charge: Decimal,
        total_price: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            quote_number,
            customer_name: customer.name,
            customer_email: customer.email,
            customer_phone: customer.phone,
            customer_company: customer.company,
            notes: customer.notes,
            quote_type: QUOTE_TYPE_ESTIMATE.to_string(),
            status: QuoteStatus::Draft,
            base_price,
            destination_charge,
            total_price,
            valid_until: now + Duration::days(QUOTE_VALIDITY_DAYS),
            created_at: now,
        }
    }
}

/// Número de cotización `ENQ-YYYYMMDD-NNNN`
pub fn format_quote_number(date: DateTime<Utc>, sequence: i64) -> String {
    format!(
        "{}-{}-{:04}",
        QUOTE_NUMBER_PREFIX,
        date.format("%Y%m%d"),
        sequence
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_quote_number() {
        let date = Utc.with_ymd_and_hms(2025, 8, 14, 10, 30, 0).unwrap();
        assert_eq!(format_quote_number(date, 7), "ENQ-20250814-0007");
        assert_eq!(format_quote_number(date, 12345), "ENQ-20250814-12345");
    }

    #[test]
    fn test_draft_validity_window() {
        let now = Utc::now();
        let quote = Quote::draft(
            Uuid::new_v4(),
            format_quote_number(now, 1),
            CustomerContact {
                name: "Fleet Buyer".into(),
                email: "buyer@example.com".into(),
                phone: None,
                company: None,
                notes: None,
            },
            Decimal::new(41585, 0),
            Decimal::new(2095, 0),
            Decimal::new(43680, 0),
            now,
        );
        assert_eq!(quote.status, QuoteStatus::Draft);
        assert_eq!(quote.quote_type, "estimate");
        assert_eq!(quote.valid_until - quote.created_at, Duration::days(30));
    }
}
