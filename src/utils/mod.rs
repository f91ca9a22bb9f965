//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación y tokens.

pub mod errors;
pub mod token;
pub mod validation;
