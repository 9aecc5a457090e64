//! The Tour aggregate: the central sellable itinerary.
//!
//! Scalar trip attributes are typed columns; the variadic nested
//! collections (packages with sharing tiers, day-by-day schedule, photo
//! gallery, recommendation sections) are stored as jsonb documents in the
//! shape produced by [`crate::domain::normalize`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted Tour row.
///
/// Geography fields hold references into the country/state/city tables by
/// ownership, not embedding; they are validated with existence lookups at
/// write time rather than foreign keys, so a reference may go stale.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    /// Unique tour identifier.
    pub id: Uuid,
    /// Referenced country id.
    pub country_id: Uuid,
    /// Referenced state id.
    pub state_id: Uuid,
    /// Referenced city id.
    pub city_id: Uuid,
    /// Tour title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Difficulty label (e.g. `"Moderate"`).
    pub difficulty: Option<String>,
    /// Duration label (e.g. `"5 Days / 4 Nights"`).
    pub duration: String,
    /// Altitude label (e.g. `"12,500 ft"`).
    pub altitude: Option<String>,
    /// Pickup points description.
    pub pickup_points: Option<String>,
    /// Base camp description.
    pub base_camp: Option<String>,
    /// Minimum participant age.
    pub minimum_age: Option<i32>,
    /// Best season to visit.
    pub best_time_to_visit: Option<String>,
    /// `"Domestic"` or `"International"`; enforced at the storage boundary.
    pub tour_type: String,
    /// Star rating, defaults to 0.
    pub tour_star: i32,
    /// Short summary.
    pub summary: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Base price in whole currency units.
    pub price: i64,
    /// Discount percentage (0 means no discount).
    pub discount: i32,
    /// Derived price after discount; recomputed whenever price or discount
    /// changes unless an explicit override was supplied.
    pub discounted_price: i64,
    /// Ordered package list: `{from, price, sharingTypes: [...]}` documents.
    pub packages: Value,
    /// Ordered day-by-day schedule: `{day, title, desc, dayImage}` documents.
    pub schedule: Value,
    /// Ordered captioned photo list: `{image, title}` documents.
    pub gallery: Value,
    /// Recommendation sections: `{title, points: [...]}` documents.
    pub recommended: Value,
    /// Track activity sections: `{title, points: [...]}` documents.
    pub track_activity: Value,
    /// Free-text places covered by the tour.
    pub places_to_be_visited: Vec<String>,
    /// Calendar dates the tour runs on.
    pub available_dates: Vec<DateTime<Utc>>,
    /// Primary photo URLs, distinct from the gallery.
    pub images: Vec<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Field set for creating a Tour.
///
/// Scalars required by the schema are still `Option` here: a missing value
/// is rejected at the storage boundary and surfaces as a persistence
/// failure rather than being pre-validated.
#[derive(Debug, Clone, Default)]
pub struct TourDraft {
    /// Referenced country id.
    pub country_id: Uuid,
    /// Referenced state id.
    pub state_id: Uuid,
    /// Referenced city id.
    pub city_id: Uuid,
    /// Tour title.
    pub title: Option<String>,
    /// Long-form description.
    pub description: Option<String>,
    /// Difficulty label.
    pub difficulty: Option<String>,
    /// Duration label.
    pub duration: Option<String>,
    /// Altitude label.
    pub altitude: Option<String>,
    /// Pickup points description.
    pub pickup_points: Option<String>,
    /// Base camp description.
    pub base_camp: Option<String>,
    /// Minimum participant age.
    pub minimum_age: Option<i32>,
    /// Best season to visit.
    pub best_time_to_visit: Option<String>,
    /// Tour type discriminator.
    pub tour_type: Option<String>,
    /// Star rating.
    pub tour_star: Option<i32>,
    /// Short summary.
    pub summary: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Base price.
    pub price: Option<i64>,
    /// Discount percentage.
    pub discount: Option<i32>,
    /// Resolved discounted price (computed or overridden).
    pub discounted_price: Option<i64>,
    /// Normalized packages document.
    pub packages: Value,
    /// Normalized schedule document.
    pub schedule: Value,
    /// Normalized gallery document.
    pub gallery: Value,
    /// Normalized recommendation sections.
    pub recommended: Value,
    /// Normalized track activity sections.
    pub track_activity: Value,
    /// Places covered by the tour.
    pub places_to_be_visited: Vec<String>,
    /// Parsed available dates.
    pub available_dates: Vec<DateTime<Utc>>,
    /// Uploaded primary image URLs.
    pub images: Vec<String>,
}

/// Explicit optional-field set for partial Tour updates.
///
/// Only fields the caller intended to touch are `Some`; everything else
/// retains its stored value. Array classes are replaced wholesale when
/// supplied, never merged.
#[derive(Debug, Clone, Default)]
pub struct TourPatch {
    /// New country reference.
    pub country_id: Option<Uuid>,
    /// New state reference.
    pub state_id: Option<Uuid>,
    /// New city reference.
    pub city_id: Option<Uuid>,
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New difficulty label.
    pub difficulty: Option<String>,
    /// New duration label.
    pub duration: Option<String>,
    /// New altitude label.
    pub altitude: Option<String>,
    /// New pickup points description.
    pub pickup_points: Option<String>,
    /// New base camp description.
    pub base_camp: Option<String>,
    /// New minimum age.
    pub minimum_age: Option<i32>,
    /// New best-time-to-visit label.
    pub best_time_to_visit: Option<String>,
    /// New tour type discriminator.
    pub tour_type: Option<String>,
    /// New star rating.
    pub tour_star: Option<i32>,
    /// New summary.
    pub summary: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New base price.
    pub price: Option<i64>,
    /// New discount percentage.
    pub discount: Option<i32>,
    /// Resolved discounted price, present whenever price, discount, or an
    /// explicit override arrived in the request.
    pub discounted_price: Option<i64>,
    /// Replacement packages document.
    pub packages: Option<Value>,
    /// Replacement schedule document.
    pub schedule: Option<Value>,
    /// Replacement gallery document.
    pub gallery: Option<Value>,
    /// Replacement recommendation sections.
    pub recommended: Option<Value>,
    /// Replacement track activity sections.
    pub track_activity: Option<Value>,
    /// Replacement places list.
    pub places_to_be_visited: Option<Vec<String>>,
    /// Replacement available dates.
    pub available_dates: Option<Vec<DateTime<Utc>>>,
    /// Replacement primary images; only set when at least one new file
    /// was uploaded.
    pub images: Option<Vec<String>>,
}

/// Resolves the stored discounted price from base price, discount
/// percentage, and an optional client override.
///
/// The override wins when present. Otherwise a positive discount takes a
/// percentage off the base price, rounded to the nearest whole currency
/// unit; a zero discount leaves the price unchanged.
#[must_use]
pub fn resolve_discounted_price(price: i64, discount: i32, override_price: Option<i64>) -> i64 {
    if let Some(explicit) = override_price {
        return explicit;
    }
    if discount > 0 {
        let percent_off = i64::from(discount.min(100));
        (price * (100 - percent_off) + 50) / 100
    } else {
        price
    }
}
