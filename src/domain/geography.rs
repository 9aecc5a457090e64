//! Geography reference data: country, state, and city records.
//!
//! These are lookup tables other entities point at by id. States carry a
//! hosted image URL; countries and cities are name-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A country reference row. Names are unique case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Unique country identifier.
    pub id: Uuid,
    /// Country name, 2–100 characters, trimmed.
    pub country_name: String,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A state reference row belonging to a country.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// Unique state identifier.
    pub id: Uuid,
    /// Owning country id.
    pub country_id: Uuid,
    /// State name, unique case-insensitively.
    pub name: String,
    /// State description.
    pub description: String,
    /// Hosted image URL; required on create.
    pub image: String,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A city reference row belonging to a state. Names are unique per state.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Unique city identifier.
    pub id: Uuid,
    /// Owning state id.
    pub state_id: Uuid,
    /// City name.
    pub city_name: String,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
