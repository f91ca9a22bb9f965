//! Modelo de selección (tabla `configuration_selections`)

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    Chassis,
    Body,
    Option,
}

impl SelectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionType::Chassis => "chassis",
            SelectionType::Body => "body",
            SelectionType::Option => "option",
        }
    }
}

impl fmt::Display for SelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chassis" => Ok(SelectionType::Chassis),
            "body" => Ok(SelectionType::Body),
            "option" => Ok(SelectionType::Option),
            other => Err(format!("Unknown selection type: {}", other)),
        }
    }
}

/// Selección registrada en una sesión. Solo se agregan filas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    pub id: Uuid,
    pub session_id: Uuid,
    pub selection_type: SelectionType,
    pub selected_item_id: String,
    pub selected_item_code: Option<String>,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub is_valid: bool,
    pub created_at: DateTime<Utc>,
}

/// Datos para crear una selección
#[derive(Debug, Clone)]
pub struct NewSelection {
    pub selection_type: SelectionType,
    pub selected_item_id: String,
    pub selected_item_code: Option<String>,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

impl NewSelection {
    pub fn into_selection(self, session_id: Uuid, now: DateTime<Utc>) -> Selection {
        Selection {
            id: Uuid::new_v4(),
            session_id,
            selection_type: self.selection_type,
            selected_item_id: self.selected_item_id,
            selected_item_code: self.selected_item_code,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price: self.total_price,
            is_valid: true,
            created_at: now,
        }
    }
}
