//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean
//! al schema PostgreSQL del configurador.

pub mod body;
pub mod chassis;
pub mod quote;
pub mod saved_configuration;
pub mod selection;
pub mod session;

pub use body::BodyConfig;
pub use chassis::ChassisSpec;
pub use quote::{CustomerContact, Quote, QuoteStatus};
pub use saved_configuration::{SavedConfiguration, SavedConfigurationData};
pub use selection::{NewSelection, Selection, SelectionType};
pub use session::{ConfigurationSession, ConfigurationStep, SessionStatus, SessionUpdate};
