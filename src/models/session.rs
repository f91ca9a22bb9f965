//! Modelo de sesión de configuración
//!
//! Una sesión guarda el progreso de un usuario en el configurador:
//! paso actual, estado, chassis/carrocería seleccionados y precios.
//! Expira 30 días después de su creación y nunca se borra.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vigencia fija de una sesión
pub const SESSION_TTL_DAYS: i64 = 30;

/// Tipo de usuario por defecto
pub const DEFAULT_USER_TYPE: &str = "customer";

/// Paso del configurador - progresión lineal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationStep {
    ChassisSelection,
    BodySelection,
    Options,
    Review,
    Complete,
}

impl ConfigurationStep {
    pub const ALL: [ConfigurationStep; 5] = [
        ConfigurationStep::ChassisSelection,
        ConfigurationStep::BodySelection,
        ConfigurationStep::Options,
        ConfigurationStep::Review,
        ConfigurationStep::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigurationStep::ChassisSelection => "chassis_selection",
            ConfigurationStep::BodySelection => "body_selection",
            ConfigurationStep::Options => "options",
            ConfigurationStep::Review => "review",
            ConfigurationStep::Complete => "complete",
        }
    }

    /// Paso siguiente; `Complete` es terminal
    pub fn next(&self) -> Option<ConfigurationStep> {
        match self {
            ConfigurationStep::ChassisSelection => Some(ConfigurationStep::BodySelection),
            ConfigurationStep::BodySelection => Some(ConfigurationStep::Options),
            ConfigurationStep::Options => Some(ConfigurationStep::Review),
            ConfigurationStep::Review => Some(ConfigurationStep::Complete),
            ConfigurationStep::Complete => None,
        }
    }
}

impl fmt::Display for ConfigurationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigurationStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigurationStep::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| format!("Unknown configuration step: {}", s))
    }
}

/// Estado de la sesión
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Expired,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Expired => "expired",
            SessionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SessionStatus::Active),
            "expired" => Ok(SessionStatus::Expired),
            "completed" => Ok(SessionStatus::Completed),
            other => Err(format!("Unknown session status: {}", other)),
        }
    }
}

/// Sesión de configuración - mapea a la tabla configuration_sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationSession {
    pub id: Uuid,
    pub session_token: String,
    pub user_type: String,
    pub current_step: ConfigurationStep,
    pub status: SessionStatus,
    pub selected_chassis_id: Option<Uuid>,
    pub selected_body_id: Option<Uuid>,
    pub base_price: Option<Decimal>,
    pub options_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ConfigurationSession {
    /// Nueva sesión activa en el primer paso
    pub fn new(session_token: String, user_type: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_token,
            user_type,
            current_step: ConfigurationStep::ChassisSelection,
            status: SessionStatus::Active,
            selected_chassis_id: None,
            selected_body_id: None,
            base_price: None,
            options_price: None,
            total_price: None,
            created_at: now,
            updated_at: now,
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        }
    }

    /// Estado observado: una sesión activa vencida se reporta como expirada
    pub fn effective_status(&self, now: DateTime<Utc>) -> SessionStatus {
        match self.status {
            SessionStatus::Active if now > self.expires_at => SessionStatus::Expired,
            status => status,
        }
    }

    pub fn accepts_selections(&self, now: DateTime<Utc>) -> bool {
        self.effective_status(now) == SessionStatus::Active
    }
}

/// Cambios parciales sobre una sesión; `None` conserva el valor actual
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub current_step: Option<ConfigurationStep>,
    pub status: Option<SessionStatus>,
    pub selected_chassis_id: Option<Uuid>,
    pub selected_body_id: Option<Uuid>,
    pub base_price: Option<Decimal>,
    pub options_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

impl SessionUpdate {
    pub fn apply(&self, session: &mut ConfigurationSession, now: DateTime<Utc>) {
        if let Some(step) = self.current_step {
            session.current_step = step;
        }
        if let Some(status) = self.status {
            session.status = status;
        }
        if self.selected_chassis_id.is_some() {
            session.selected_chassis_id = self.selected_chassis_id;
        }
        if self.selected_body_id.is_some() {
            session.selected_body_id = self.selected_body_id;
        }
        if self.base_price.is_some() {
            session.base_price = self.base_price;
        }
        if self.options_price.is_some() {
            session.options_price = self.options_price;
        }
        if self.total_price.is_some() {
            session.total_price = self.total_price;
        }
        session.updated_at = now;
    }
}
