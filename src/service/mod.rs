//! Business services: validation, normalization, asset uploads, and
//! persistence orchestration for each entity family.
//!
//! Handlers stay thin; every rule lives here, behind constructors that take
//! the store and asset-host traits so tests can run against in-memory
//! doubles.

pub mod geo_service;
pub mod inquiry_service;
pub mod tour_service;

pub use geo_service::{CityPayload, CountryPayload, GeoService};
pub use inquiry_service::InquiryService;
pub use tour_service::{PopulatedTour, TourHighlights, TourService};

use bytes::Bytes;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::normalize::FieldMap;
use crate::error::ApiError;

/// One file received with a request, tagged with the form field it arrived
/// under so it can be routed to the right slot (primary images, gallery
/// entry, schedule day).
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// The multipart field name, e.g. `images` or `gallery[2][image]`.
    pub field: String,
    /// Raw file bytes.
    pub bytes: Bytes,
}

/// Reads a field as trimmed text, treating blank values as absent. Numeric
/// values are stringified, which tolerates clients that send numbers for
/// text columns.
pub(crate) fn field_string(fields: &FieldMap, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a field as an integer, accepting both JSON numbers and numeric
/// text (multipart bodies carry everything as text).
///
/// # Errors
/// Returns [`ApiError::Validation`] when the value is present but not a
/// whole number.
pub(crate) fn field_i64(fields: &FieldMap, key: &str) -> Result<Option<i64>, ApiError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| ApiError::Validation(format!("{key} must be a whole number"))),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ApiError::Validation(format!("{key} must be a whole number")))
        }
        Some(_) => Err(ApiError::Validation(format!(
            "{key} must be a whole number"
        ))),
    }
}

/// Narrowing variant of [`field_i64`] for `i32` columns.
pub(crate) fn field_i32(fields: &FieldMap, key: &str) -> Result<Option<i32>, ApiError> {
    match field_i64(fields, key)? {
        None => Ok(None),
        Some(wide) => i32::try_from(wide)
            .map(Some)
            .map_err(|_| ApiError::Validation(format!("{key} is out of range"))),
    }
}

/// Parses a field holding a geography reference id.
///
/// # Errors
/// Returns [`ApiError::Validation`] when the value is present but not a
/// well-formed id.
pub(crate) fn field_uuid(fields: &FieldMap, key: &str) -> Result<Option<Uuid>, ApiError> {
    match field_string(fields, key) {
        None => Ok(None),
        Some(text) => Uuid::parse_str(&text)
            .map(Some)
            .map_err(|_| ApiError::Validation(format!("{key} is not a valid id"))),
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_string_trims_and_drops_blanks() {
        let map = testing::fields(json!({"title": "  Valley Trek ", "summary": "   "}));
        assert_eq!(field_string(&map, "title").as_deref(), Some("Valley Trek"));
        assert_eq!(field_string(&map, "summary"), None);
        assert_eq!(field_string(&map, "missing"), None);
    }

    #[test]
    fn field_i64_accepts_numeric_text() {
        let map = testing::fields(json!({"price": "1500", "discount": 20}));
        assert_eq!(field_i64(&map, "price").unwrap(), Some(1500));
        assert_eq!(field_i64(&map, "discount").unwrap(), Some(20));
    }

    #[test]
    fn field_i64_rejects_non_numeric_text() {
        let map = testing::fields(json!({"price": "cheap"}));
        assert!(matches!(
            field_i64(&map, "price"),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn field_uuid_rejects_malformed_ids() {
        let map = testing::fields(json!({"country": "not-an-id"}));
        assert!(matches!(
            field_uuid(&map, "country"),
            Err(ApiError::Validation(_))
        ));
    }
}
