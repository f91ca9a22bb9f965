//! Controlador de cotizaciones
//!
//! Crear una cotización congela el precio de la sesión en ese momento y
//! la marca como completada. El PDF se genera bajo demanda a partir de la
//! cotización guardada y del catálogo actual.

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::dto::quote_dto::{CreateQuoteRequest, QuoteResponse};
use crate::models::quote::format_quote_number;
use crate::models::{ConfigurationStep, CustomerContact, Quote, SessionStatus, SessionUpdate};
use crate::repositories::{CatalogRepository, QuoteRepository, SessionRepository};
use crate::services::{render_quote_pdf, PricingService, QuoteDocument};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{parse_id, require_field};

/// PDF listo para enviar
pub struct RenderedQuote {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct QuoteController {
    catalog: Arc<dyn CatalogRepository>,
    sessions: Arc<dyn SessionRepository>,
    quotes: Arc<dyn QuoteRepository>,
}

impl QuoteController {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        sessions: Arc<dyn SessionRepository>,
        quotes: Arc<dyn QuoteRepository>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            quotes,
        }
    }

    pub async fn create_quote(&self, request: CreateQuoteRequest) -> Result<QuoteResponse, AppError> {
        let request = request.normalized();
        let session_id = require_field(request.session_id.clone(), "sessionId")?;
        let name = require_field(request.customer_name.clone(), "customerName")?;
        let email = require_field(request.customer_email.clone(), "customerEmail")?;
        request.validate()?;

        let session_id = parse_id(&session_id, "Session")?;
        let session = self
            .sessions
            .find_session(session_id)
            .await?
            .ok_or_else(|| not_found_error("Session"))?;

        let breakdown = PricingService::new(self.catalog.as_ref()).price_session(&session).await?;

        let now = Utc::now();
        let sequence = self.quotes.next_quote_sequence().await?;
        let quote = Quote::draft(
            session.id,
            format_quote_number(now, sequence),
            CustomerContact {
                name,
                email,
                phone: request.customer_phone,
                company: request.customer_company,
                notes: request.notes,
            },
            breakdown.chassis_price,
            breakdown.destination_charge,
            breakdown.total_price,
            now,
        );
        let quote = self.quotes.create_quote(&quote).await?;

        let completed = SessionUpdate {
            status: Some(SessionStatus::Completed),
            current_step: Some(ConfigurationStep::Complete),
            ..Default::default()
        };
        if self.sessions.update_session(session.id, &completed).await?.is_none() {
            tracing::warn!("⚠️ Sesión {} desapareció antes de completarse", session.id);
        }

        tracing::info!(
            "✅ Cotización {} creada para sesión {} (total: {})",
            quote.quote_number,
            session.id,
            quote.total_price
        );
        Ok(QuoteResponse::from(quote))
    }

    pub async fn get_quote(&self, id: &str) -> Result<QuoteResponse, AppError> {
        Ok(QuoteResponse::from(self.find_quote(id).await?))
    }

    pub async fn render_pdf(&self, id: &str) -> Result<RenderedQuote, AppError> {
        let quote = self.find_quote(id).await?;
        let session = self
            .sessions
            .find_session(quote.session_id)
            .await?
            .ok_or_else(|| not_found_error("Session"))?;

        let chassis = match session.selected_chassis_id {
            Some(chassis_id) => self.catalog.find_chassis(chassis_id).await?,
            None => None,
        };
        let body = match session.selected_body_id {
            Some(body_id) => self.catalog.find_body(body_id).await?,
            None => None,
        };

        let document = QuoteDocument {
            quote: &quote,
            chassis_selected: session.selected_chassis_id.is_some(),
            chassis: chassis.as_ref(),
            body_selected: session.selected_body_id.is_some(),
            body: body.as_ref(),
            generated_at: Utc::now(),
        };

        let bytes = render_quote_pdf(&document)?;
        tracing::info!("📄 PDF de cotización {} generado ({} bytes)", quote.quote_number, bytes.len());

        Ok(RenderedQuote {
            file_name: document.file_name(),
            bytes,
        })
    }

    async fn find_quote(&self, id: &str) -> Result<Quote, AppError> {
        let id = parse_id(id, "Quote")?;
        self.quotes
            .find_quote(id)
            .await?
            .ok_or_else(|| not_found_error("Quote"))
    }
}
