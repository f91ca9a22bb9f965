//! Services module
//!
//! Lógica de negocio que combina varios almacenes: cálculo de precios y
//! generación del documento PDF de una cotización.

pub mod pricing_service;
pub mod quote_pdf_service;

pub use pricing_service::{compute_price, PriceBreakdown, PricingService};
pub use quote_pdf_service::{render_quote_pdf, QuoteDocument};
