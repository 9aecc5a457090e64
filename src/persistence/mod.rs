//! Persistence layer: PostgreSQL-backed stores behind trait seams.
//!
//! Each entity family gets a store trait so the service layer can be
//! exercised against an in-memory double. The production implementation
//! is [`postgres::PgStore`] over a shared `sqlx::PgPool`.
//!
//! Tours reference geography rows by id with no foreign keys; existence
//! is checked by lookup at write time. There is no optimistic concurrency
//! on updates — last write wins.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::geography::{City, Country, State};
use crate::domain::inquiry::{Inquiry, InquiryDraft, InquiryPatch};
use crate::domain::tour::{Tour, TourDraft, TourPatch};
use crate::error::ApiError;

pub use postgres::PgStore;

/// Field set for creating a state. Required values left `None` are
/// rejected at the storage boundary.
#[derive(Debug, Clone, Default)]
pub struct StateDraft {
    /// Owning country id.
    pub country_id: Uuid,
    /// State name.
    pub name: Option<String>,
    /// State description.
    pub description: Option<String>,
    /// Hosted image URL.
    pub image: String,
}

/// Explicit optional-field set for partial state updates.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    /// New owning country.
    pub country_id: Option<Uuid>,
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Replacement image URL; only set when a new file was uploaded.
    pub image: Option<String>,
}

/// Storage operations for the Tour aggregate.
#[async_trait]
pub trait TourStore: Send + Sync + std::fmt::Debug {
    /// Inserts a new tour and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage rejection (missing
    /// required scalar, constraint violation).
    async fn insert_tour(&self, draft: TourDraft) -> Result<Tour, ApiError>;

    /// Applies a partial update; absent patch fields retain stored values.
    /// Returns `None` when the tour does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage rejection.
    async fn update_tour(&self, id: Uuid, patch: TourPatch) -> Result<Option<Tour>, ApiError>;

    /// Fetches one tour by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn fetch_tour(&self, id: Uuid) -> Result<Option<Tour>, ApiError>;

    /// Lists all tours, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn list_tours(&self) -> Result<Vec<Tour>, ApiError>;

    /// Deletes one tour; returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn delete_tour(&self, id: Uuid) -> Result<bool, ApiError>;

    /// Tours with at least one available date at or after `now`, ordered
    /// by their earliest such date, then newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn upcoming_tours(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Tour>, ApiError>;

    /// Tours whose discounted price undercuts their base price, cheapest
    /// first, then newest.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn discounted_tours(&self, limit: i64) -> Result<Vec<Tour>, ApiError>;
}

/// Storage operations for geography reference data.
///
/// # Errors
///
/// Every method returns [`ApiError::Persistence`] on storage failure or
/// rejection; mutation methods returning `Option` yield `None` when the
/// target row does not exist.
#[allow(clippy::missing_errors_doc)]
#[async_trait]
pub trait GeoStore: Send + Sync + std::fmt::Debug {
    /// Inserts a new country.
    async fn insert_country(&self, name: &str) -> Result<Country, ApiError>;
    /// Lists all countries, newest first.
    async fn list_countries(&self) -> Result<Vec<Country>, ApiError>;
    /// Fetches one country by id.
    async fn fetch_country(&self, id: Uuid) -> Result<Option<Country>, ApiError>;
    /// Case-insensitive name collision check, optionally excluding one row.
    async fn country_name_taken(&self, name: &str, exclude: Option<Uuid>)
    -> Result<bool, ApiError>;
    /// Replaces a country's name.
    async fn update_country(&self, id: Uuid, name: &str) -> Result<Option<Country>, ApiError>;
    /// Deletes one country; returns whether a row was removed.
    async fn delete_country(&self, id: Uuid) -> Result<bool, ApiError>;

    /// Inserts a new state.
    async fn insert_state(&self, draft: StateDraft) -> Result<State, ApiError>;
    /// Lists all states, newest first.
    async fn list_states(&self) -> Result<Vec<State>, ApiError>;
    /// Fetches one state by id.
    async fn fetch_state(&self, id: Uuid) -> Result<Option<State>, ApiError>;
    /// Applies a partial state update.
    async fn update_state(&self, id: Uuid, patch: StatePatch) -> Result<Option<State>, ApiError>;
    /// Deletes one state; returns whether a row was removed.
    async fn delete_state(&self, id: Uuid) -> Result<bool, ApiError>;

    /// Inserts a new city under a state.
    async fn insert_city(&self, state_id: Uuid, name: &str) -> Result<City, ApiError>;
    /// Lists all cities.
    async fn list_cities(&self) -> Result<Vec<City>, ApiError>;
    /// Fetches one city by id.
    async fn fetch_city(&self, id: Uuid) -> Result<Option<City>, ApiError>;
    /// Lists cities belonging to a state.
    async fn cities_by_state(&self, state_id: Uuid) -> Result<Vec<City>, ApiError>;
    /// Per-state case-insensitive city name collision check.
    async fn city_name_taken(&self, state_id: Uuid, name: &str) -> Result<bool, ApiError>;
    /// Replaces a city's name.
    async fn update_city(&self, id: Uuid, name: &str) -> Result<Option<City>, ApiError>;
    /// Deletes one city; returns whether a row was removed.
    async fn delete_city(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Storage operations for customer inquiries.
#[async_trait]
pub trait InquiryStore: Send + Sync + std::fmt::Debug {
    /// Inserts a new inquiry and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage rejection.
    async fn insert_inquiry(&self, draft: InquiryDraft) -> Result<Inquiry, ApiError>;

    /// Lists all inquiries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, ApiError>;

    /// Fetches one inquiry by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn fetch_inquiry(&self, id: Uuid) -> Result<Option<Inquiry>, ApiError>;

    /// Applies a partial update; returns `None` when the inquiry does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage rejection.
    async fn update_inquiry(&self, id: Uuid, patch: InquiryPatch)
    -> Result<Option<Inquiry>, ApiError>;

    /// Deletes one inquiry; returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn delete_inquiry(&self, id: Uuid) -> Result<bool, ApiError>;
}
