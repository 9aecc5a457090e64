//! Customer inquiry records: plain JSON intake with no uploads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted inquiry row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    /// Unique inquiry identifier.
    pub id: Uuid,
    /// Customer full name.
    pub fullname: String,
    /// Customer email, stored lowercased.
    pub email: String,
    /// Customer phone number.
    pub phone_number: String,
    /// Inquiry category.
    pub inquiry_type: String,
    /// Destination the customer is asking about.
    pub preferred_destination: Option<String>,
    /// `{from, to}` date range document.
    pub travel_dates: Option<Value>,
    /// Number of travellers, at least 1.
    pub group_size: Option<i32>,
    /// `{min, max}` budget document.
    pub budget_range: Option<Value>,
    /// Free-text message.
    pub message: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Field set for creating an inquiry. Required scalars left `None` are
/// rejected at the storage boundary.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryDraft {
    /// Customer full name.
    pub fullname: Option<String>,
    /// Customer email; lowercased before storage.
    pub email: Option<String>,
    /// Customer phone number.
    pub phone_number: Option<String>,
    /// Inquiry category.
    pub inquiry_type: Option<String>,
    /// Destination the customer is asking about.
    pub preferred_destination: Option<String>,
    /// `{from, to}` date range document.
    pub travel_dates: Option<Value>,
    /// Number of travellers.
    pub group_size: Option<i32>,
    /// `{min, max}` budget document.
    pub budget_range: Option<Value>,
    /// Free-text message.
    pub message: Option<String>,
}

/// Explicit optional-field set for partial inquiry updates.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InquiryPatch {
    /// New full name.
    pub fullname: Option<String>,
    /// New email; lowercased before storage.
    pub email: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New inquiry category.
    pub inquiry_type: Option<String>,
    /// New preferred destination.
    pub preferred_destination: Option<String>,
    /// New date range document.
    pub travel_dates: Option<Value>,
    /// New group size.
    pub group_size: Option<i32>,
    /// New budget document.
    pub budget_range: Option<Value>,
    /// New message.
    pub message: Option<String>,
}
