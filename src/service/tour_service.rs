//! Tour orchestration: geography validation, image uploads, field
//! normalization, price resolution, and persistence.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use futures_util::future::try_join_all;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{UploadedFile, field_i32, field_i64, field_string, field_uuid};
use crate::assets::AssetHost;
use crate::domain::geography::{City, Country, State};
use crate::domain::normalize::{
    FieldMap, UploadMap, is_gallery_image_key, is_schedule_image_key, normalize_fields,
};
use crate::domain::tour::{Tour, TourDraft, TourPatch, resolve_discounted_price};
use crate::error::ApiError;
use crate::persistence::{GeoStore, TourStore};

/// Asset-host folder for tour images.
const TOUR_FOLDER: &str = "tours";
/// How many tours each highlight list carries.
const HIGHLIGHT_LIMIT: i64 = 10;

/// A tour joined with its geography rows. References that no longer
/// resolve come back as `null` rather than failing the read.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedTour {
    /// The tour row itself, flattened into the top level.
    #[serde(flatten)]
    pub tour: Tour,
    /// Resolved country, when the reference is still live.
    pub country: Option<Country>,
    /// Resolved state.
    pub state: Option<State>,
    /// Resolved city.
    pub city: Option<City>,
}

/// Landing-page highlight lists.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourHighlights {
    /// Tours with at least one future departure, soonest first.
    pub upcoming: Vec<PopulatedTour>,
    /// Currently discounted tours, deepest discount first.
    pub popular: Vec<PopulatedTour>,
}

/// Service for the Tour aggregate.
#[derive(Debug, Clone)]
pub struct TourService {
    tours: Arc<dyn TourStore>,
    geo: Arc<dyn GeoStore>,
    assets: Arc<dyn AssetHost>,
}

impl TourService {
    /// Wires the service to its stores and asset host.
    #[must_use]
    pub fn new(tours: Arc<dyn TourStore>, geo: Arc<dyn GeoStore>, assets: Arc<dyn AssetHost>) -> Self {
        Self { tours, geo, assets }
    }

    /// Creates a tour from a raw payload plus its uploaded files.
    ///
    /// Geography references are validated before any upload happens, so a
    /// bad reference costs no asset-host traffic. Files are uploaded before
    /// the document write; an upload failure therefore leaves no document
    /// behind, while a document write failure can strand uploaded assets.
    ///
    /// # Errors
    /// - [`ApiError::Validation`] when a geography id or primary image is
    ///   missing, or a supplied value is malformed.
    /// - [`ApiError::ReferenceNotFound`] when a geography id does not
    ///   resolve.
    /// - [`ApiError::Upstream`] when the asset host fails.
    /// - [`ApiError::Persistence`] when the storage layer rejects the row,
    ///   including missing required scalars.
    pub async fn create(
        &self,
        fields: FieldMap,
        files: Vec<UploadedFile>,
    ) -> Result<Tour, ApiError> {
        let country_id = field_uuid(&fields, "country")?
            .ok_or_else(|| ApiError::Validation("country is required".to_owned()))?;
        let state_id = field_uuid(&fields, "state")?
            .ok_or_else(|| ApiError::Validation("state is required".to_owned()))?;
        let city_id = field_uuid(&fields, "city")?
            .ok_or_else(|| ApiError::Validation("city is required".to_owned()))?;
        self.check_geography(Some(country_id), Some(state_id), Some(city_id))
            .await?;

        let uploads = self.upload_files(files).await?;
        if uploads.primary.is_empty() {
            return Err(ApiError::Validation(
                "At least one tour image is required".to_owned(),
            ));
        }

        let normalized = normalize_fields(&fields, &uploads.gallery, &uploads.schedule);
        let available_dates = parse_available_dates(normalized.available_dates.as_ref())?;

        let price = field_i64(&fields, "price")?;
        let discount = field_i32(&fields, "discount")?.map(|d| d.max(0));
        let override_price = field_i64(&fields, "discountedPrice")?;
        let discounted_price =
            price.map(|p| resolve_discounted_price(p, discount.unwrap_or(0), override_price));

        let draft = TourDraft {
            country_id,
            state_id,
            city_id,
            title: field_string(&fields, "title"),
            description: field_string(&fields, "description"),
            difficulty: field_string(&fields, "difficulty"),
            duration: field_string(&fields, "duration"),
            altitude: field_string(&fields, "altitude"),
            pickup_points: field_string(&fields, "pickupPoints"),
            base_camp: field_string(&fields, "baseCamp"),
            minimum_age: field_i32(&fields, "minimumAge")?,
            best_time_to_visit: field_string(&fields, "bestTimeToVisit"),
            tour_type: field_string(&fields, "tourType"),
            tour_star: field_i32(&fields, "tourStar")?,
            summary: field_string(&fields, "summary"),
            location: field_string(&fields, "location"),
            price,
            discount,
            discounted_price,
            packages: normalized.packages.unwrap_or_else(empty_array),
            schedule: normalized
                .schedule
                .map_or_else(empty_array, Value::Array),
            gallery: normalized.gallery.map_or_else(empty_array, Value::Array),
            recommended: normalized.recommended.unwrap_or_else(empty_array),
            track_activity: normalized.track_activity.unwrap_or_else(empty_array),
            places_to_be_visited: normalized.places_to_be_visited.unwrap_or_default(),
            available_dates,
            images: uploads.primary,
        };
        self.tours.insert_tour(draft).await
    }

    /// Applies a partial update to a tour.
    ///
    /// Only fields present in the payload change; nested collections the
    /// request does not touch keep their stored value. The discounted
    /// price is recomputed whenever price, discount, or an explicit
    /// override arrives, using the stored values for whichever of the
    /// three stayed absent.
    ///
    /// # Errors
    /// As for [`Self::create`], plus [`ApiError::EntityNotFound`] when the
    /// tour does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        fields: FieldMap,
        files: Vec<UploadedFile>,
    ) -> Result<Tour, ApiError> {
        let existing = self
            .tours
            .fetch_tour(id)
            .await?
            .ok_or(ApiError::EntityNotFound("Tour"))?;

        let country_id = field_uuid(&fields, "country")?;
        let state_id = field_uuid(&fields, "state")?;
        let city_id = field_uuid(&fields, "city")?;
        self.check_geography(country_id, state_id, city_id).await?;

        let uploads = self.upload_files(files).await?;
        let normalized = normalize_fields(&fields, &uploads.gallery, &uploads.schedule);
        let available_dates = match normalized.available_dates.as_ref() {
            Some(value) => Some(parse_available_dates(Some(value))?),
            None => None,
        };

        let price = field_i64(&fields, "price")?;
        let discount = field_i32(&fields, "discount")?.map(|d| d.max(0));
        let override_price = field_i64(&fields, "discountedPrice")?;
        let discounted_price =
            if price.is_some() || discount.is_some() || override_price.is_some() {
                Some(resolve_discounted_price(
                    price.unwrap_or(existing.price),
                    discount.unwrap_or(existing.discount),
                    override_price,
                ))
            } else {
                None
            };

        let patch = TourPatch {
            country_id,
            state_id,
            city_id,
            title: field_string(&fields, "title"),
            description: field_string(&fields, "description"),
            difficulty: field_string(&fields, "difficulty"),
            duration: field_string(&fields, "duration"),
            altitude: field_string(&fields, "altitude"),
            pickup_points: field_string(&fields, "pickupPoints"),
            base_camp: field_string(&fields, "baseCamp"),
            minimum_age: field_i32(&fields, "minimumAge")?,
            best_time_to_visit: field_string(&fields, "bestTimeToVisit"),
            tour_type: field_string(&fields, "tourType"),
            tour_star: field_i32(&fields, "tourStar")?,
            summary: field_string(&fields, "summary"),
            location: field_string(&fields, "location"),
            price,
            discount,
            discounted_price,
            packages: normalized.packages,
            schedule: normalized.schedule.map(Value::Array),
            gallery: normalized.gallery.map(Value::Array),
            recommended: normalized.recommended,
            track_activity: normalized.track_activity,
            places_to_be_visited: normalized.places_to_be_visited,
            available_dates,
            images: (!uploads.primary.is_empty()).then_some(uploads.primary),
        };
        self.tours
            .update_tour(id, patch)
            .await?
            .ok_or(ApiError::EntityNotFound("Tour"))
    }

    /// Fetches a single tour with its geography populated.
    ///
    /// # Errors
    /// [`ApiError::EntityNotFound`] when the tour does not exist.
    pub async fn get(&self, id: Uuid) -> Result<PopulatedTour, ApiError> {
        let tour = self
            .tours
            .fetch_tour(id)
            .await?
            .ok_or(ApiError::EntityNotFound("Tour"))?;
        let mut populated = self.populate(vec![tour]).await?;
        populated
            .pop()
            .ok_or_else(|| ApiError::Internal("populated tour vanished".to_owned()))
    }

    /// Lists every tour, newest first, with geography populated.
    ///
    /// # Errors
    /// [`ApiError::Persistence`] on storage failure.
    pub async fn list(&self) -> Result<Vec<PopulatedTour>, ApiError> {
        let tours = self.tours.list_tours().await?;
        self.populate(tours).await
    }

    /// Deletes a tour.
    ///
    /// Hosted images are left in place; the asset host is treated as an
    /// append-mostly archive and cleanup is a manual operation.
    ///
    /// # Errors
    /// [`ApiError::EntityNotFound`] when the tour does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        if self.tours.delete_tour(id).await? {
            Ok(())
        } else {
            Err(ApiError::EntityNotFound("Tour"))
        }
    }

    /// Builds the landing-page highlight lists.
    ///
    /// # Errors
    /// [`ApiError::Persistence`] on storage failure.
    pub async fn highlights(&self) -> Result<TourHighlights, ApiError> {
        let upcoming = self
            .tours
            .upcoming_tours(Utc::now(), HIGHLIGHT_LIMIT)
            .await?;
        let popular = self.tours.discounted_tours(HIGHLIGHT_LIMIT).await?;
        Ok(TourHighlights {
            upcoming: self.populate(upcoming).await?,
            popular: self.populate(popular).await?,
        })
    }

    /// Validates whichever geography references are present, each against
    /// its own table.
    async fn check_geography(
        &self,
        country_id: Option<Uuid>,
        state_id: Option<Uuid>,
        city_id: Option<Uuid>,
    ) -> Result<(), ApiError> {
        if let Some(id) = country_id
            && self.geo.fetch_country(id).await?.is_none()
        {
            return Err(ApiError::ReferenceNotFound("Country"));
        }
        if let Some(id) = state_id
            && self.geo.fetch_state(id).await?.is_none()
        {
            return Err(ApiError::ReferenceNotFound("State"));
        }
        if let Some(id) = city_id
            && self.geo.fetch_city(id).await?.is_none()
        {
            return Err(ApiError::ReferenceNotFound("City"));
        }
        Ok(())
    }

    /// Uploads every file and routes the resulting URLs by field name.
    ///
    /// Primary images go up concurrently; gallery and schedule images go
    /// up one at a time so their URLs key deterministically by field path.
    async fn upload_files(&self, files: Vec<UploadedFile>) -> Result<RoutedUploads, ApiError> {
        let mut routed = RoutedUploads::default();
        let mut primary = Vec::new();
        for file in files {
            if file.field == "images" {
                primary.push(file.bytes);
            } else if is_gallery_image_key(&file.field) {
                let url = self.assets.store(TOUR_FOLDER, file.bytes).await?;
                routed.gallery.insert(file.field, url);
            } else if is_schedule_image_key(&file.field) {
                let url = self.assets.store(TOUR_FOLDER, file.bytes).await?;
                routed.schedule.insert(file.field, url);
            }
        }
        routed.primary = try_join_all(
            primary
                .into_iter()
                .map(|bytes| self.assets.store(TOUR_FOLDER, bytes)),
        )
        .await?;
        Ok(routed)
    }

    /// Joins geography rows onto tours, fetching each distinct reference
    /// once.
    async fn populate(&self, tours: Vec<Tour>) -> Result<Vec<PopulatedTour>, ApiError> {
        let mut countries: HashMap<Uuid, Option<Country>> = HashMap::new();
        let mut states: HashMap<Uuid, Option<State>> = HashMap::new();
        let mut cities: HashMap<Uuid, Option<City>> = HashMap::new();

        for tour in &tours {
            if !countries.contains_key(&tour.country_id) {
                let row = self.geo.fetch_country(tour.country_id).await?;
                countries.insert(tour.country_id, row);
            }
            if !states.contains_key(&tour.state_id) {
                let row = self.geo.fetch_state(tour.state_id).await?;
                states.insert(tour.state_id, row);
            }
            if !cities.contains_key(&tour.city_id) {
                let row = self.geo.fetch_city(tour.city_id).await?;
                cities.insert(tour.city_id, row);
            }
        }

        Ok(tours
            .into_iter()
            .map(|tour| PopulatedTour {
                country: countries.get(&tour.country_id).cloned().flatten(),
                state: states.get(&tour.state_id).cloned().flatten(),
                city: cities.get(&tour.city_id).cloned().flatten(),
                tour,
            })
            .collect())
    }
}

/// Uploaded URLs routed to their destination slots.
#[derive(Debug, Default)]
struct RoutedUploads {
    primary: Vec<String>,
    gallery: UploadMap,
    schedule: UploadMap,
}

fn empty_array() -> Value {
    Value::Array(Vec::new())
}

/// Parses the normalized `availableDates` value into concrete timestamps.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (taken as
/// midnight UTC); a single string is treated as a one-element list.
///
/// # Errors
/// [`ApiError::Validation`] on any entry that parses as neither.
fn parse_available_dates(value: Option<&Value>) -> Result<Vec<DateTime<Utc>>, ApiError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };
    let mut dates = Vec::with_capacity(items.len());
    for item in items {
        let Value::String(text) = item else {
            return Err(ApiError::Validation(
                "availableDates entries must be date strings".to_owned(),
            ));
        };
        dates.push(parse_date(text)?);
    }
    Ok(dates)
}

fn parse_date(text: &str) -> Result<DateTime<Utc>, ApiError> {
    let trimmed = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ApiError::Validation(format!("availableDates contains an invalid date: {trimmed}")))
}
