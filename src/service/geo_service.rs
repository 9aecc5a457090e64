//! Geography services: countries, states, and cities.
//!
//! Countries and cities are plain JSON CRUD with uniqueness rules; states
//! carry a hosted image and arrive as multipart payloads.

use std::sync::Arc;

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{UploadedFile, field_string, field_uuid};
use crate::assets::AssetHost;
use crate::domain::geography::{City, Country, State};
use crate::domain::normalize::FieldMap;
use crate::error::ApiError;
use crate::persistence::{GeoStore, StateDraft, StatePatch};

/// Asset-host folder for state images.
const STATE_FOLDER: &str = "states";

const COUNTRY_NAME_MIN: usize = 2;
const COUNTRY_NAME_MAX: usize = 100;

/// JSON payload for creating or renaming a country.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryPayload {
    /// The country name.
    pub country_name: Option<String>,
}

/// JSON payload for creating or renaming a city.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityPayload {
    /// Owning state id; required on create, ignored on rename.
    pub state_id: Option<Uuid>,
    /// The city name.
    pub city_name: Option<String>,
}

/// Service for the geography tables.
#[derive(Debug, Clone)]
pub struct GeoService {
    geo: Arc<dyn GeoStore>,
    assets: Arc<dyn AssetHost>,
}

impl GeoService {
    /// Wires the service to its store and asset host.
    #[must_use]
    pub fn new(geo: Arc<dyn GeoStore>, assets: Arc<dyn AssetHost>) -> Self {
        Self { geo, assets }
    }

    /// Creates a country after name validation and a case-insensitive
    /// uniqueness check.
    ///
    /// # Errors
    /// [`ApiError::Validation`] on a missing, out-of-range, or duplicate
    /// name.
    pub async fn create_country(&self, payload: CountryPayload) -> Result<Country, ApiError> {
        let name = validate_country_name(payload.country_name.as_deref())?;
        if self.geo.country_name_taken(&name, None).await? {
            return Err(ApiError::Validation("Country already exists".to_owned()));
        }
        self.geo.insert_country(&name).await
    }

    /// Lists all countries, newest first.
    ///
    /// # Errors
    /// [`ApiError::Persistence`] on storage failure.
    pub async fn list_countries(&self) -> Result<Vec<Country>, ApiError> {
        self.geo.list_countries().await
    }

    /// Fetches one country.
    ///
    /// # Errors
    /// [`ApiError::EntityNotFound`] when it does not exist.
    pub async fn get_country(&self, id: Uuid) -> Result<Country, ApiError> {
        self.geo
            .fetch_country(id)
            .await?
            .ok_or(ApiError::EntityNotFound("Country"))
    }

    /// Renames a country, excluding itself from the uniqueness check.
    ///
    /// # Errors
    /// As for [`Self::create_country`], plus [`ApiError::EntityNotFound`].
    pub async fn update_country(
        &self,
        id: Uuid,
        payload: CountryPayload,
    ) -> Result<Country, ApiError> {
        let name = validate_country_name(payload.country_name.as_deref())?;
        if self.geo.country_name_taken(&name, Some(id)).await? {
            return Err(ApiError::Validation("Country already exists".to_owned()));
        }
        self.geo
            .update_country(id, &name)
            .await?
            .ok_or(ApiError::EntityNotFound("Country"))
    }

    /// Deletes a country. Rows referencing it are left as-is.
    ///
    /// # Errors
    /// [`ApiError::EntityNotFound`] when it does not exist.
    pub async fn delete_country(&self, id: Uuid) -> Result<(), ApiError> {
        if self.geo.delete_country(id).await? {
            Ok(())
        } else {
            Err(ApiError::EntityNotFound("Country"))
        }
    }

    /// Creates a state from a multipart payload. The image upload is
    /// mandatory and happens only after the country reference resolves.
    ///
    /// # Errors
    /// - [`ApiError::Validation`] when the country id or image file is
    ///   missing.
    /// - [`ApiError::ReferenceNotFound`] when the country id does not
    ///   resolve.
    /// - [`ApiError::Upstream`] when the asset host fails.
    /// - [`ApiError::Persistence`] when required scalars are missing.
    pub async fn create_state(
        &self,
        fields: FieldMap,
        files: Vec<UploadedFile>,
    ) -> Result<State, ApiError> {
        let country_id = field_uuid(&fields, "country")?
            .ok_or_else(|| ApiError::Validation("country is required".to_owned()))?;
        if self.geo.fetch_country(country_id).await?.is_none() {
            return Err(ApiError::ReferenceNotFound("Country"));
        }
        let image_file = files
            .into_iter()
            .find(|f| f.field == "image")
            .ok_or_else(|| ApiError::Validation("State image is required".to_owned()))?;
        let image = self.assets.store(STATE_FOLDER, image_file.bytes).await?;

        self.geo
            .insert_state(StateDraft {
                country_id,
                name: field_string(&fields, "name"),
                description: field_string(&fields, "description"),
                image,
            })
            .await
    }

    /// Lists all states, newest first.
    ///
    /// # Errors
    /// [`ApiError::Persistence`] on storage failure.
    pub async fn list_states(&self) -> Result<Vec<State>, ApiError> {
        self.geo.list_states().await
    }

    /// Fetches one state.
    ///
    /// # Errors
    /// [`ApiError::EntityNotFound`] when it does not exist.
    pub async fn get_state(&self, id: Uuid) -> Result<State, ApiError> {
        self.geo
            .fetch_state(id)
            .await?
            .ok_or(ApiError::EntityNotFound("State"))
    }

    /// Applies a partial update to a state; a new image file replaces the
    /// stored URL, otherwise the old one stays.
    ///
    /// # Errors
    /// As for [`Self::create_state`], plus [`ApiError::EntityNotFound`].
    pub async fn update_state(
        &self,
        id: Uuid,
        fields: FieldMap,
        files: Vec<UploadedFile>,
    ) -> Result<State, ApiError> {
        let Some(existing) = self.geo.fetch_state(id).await? else {
            return Err(ApiError::EntityNotFound("State"));
        };
        let country_id = field_uuid(&fields, "country")?;
        if let Some(cid) = country_id
            && self.geo.fetch_country(cid).await?.is_none()
        {
            return Err(ApiError::ReferenceNotFound("Country"));
        }
        let image = match files.into_iter().find(|f| f.field == "image") {
            Some(file) => Some(self.assets.store(STATE_FOLDER, file.bytes).await?),
            None => None,
        };
        let replaced_image = image.is_some();

        let updated = self
            .geo
            .update_state(
                id,
                StatePatch {
                    country_id,
                    name: field_string(&fields, "name"),
                    description: field_string(&fields, "description"),
                    image,
                },
            )
            .await?
            .ok_or(ApiError::EntityNotFound("State"))?;
        if replaced_image {
            self.discard_image(&existing.image).await;
        }
        Ok(updated)
    }

    /// Deletes a state along with its hosted image.
    ///
    /// # Errors
    /// [`ApiError::EntityNotFound`] when it does not exist.
    pub async fn delete_state(&self, id: Uuid) -> Result<(), ApiError> {
        let Some(state) = self.geo.fetch_state(id).await? else {
            return Err(ApiError::EntityNotFound("State"));
        };
        if self.geo.delete_state(id).await? {
            self.discard_image(&state.image).await;
        }
        Ok(())
    }

    /// Removes a superseded hosted image. The row write already
    /// succeeded, so a host failure is logged instead of surfaced.
    async fn discard_image(&self, url: &str) {
        if let Err(err) = self.assets.delete(url).await {
            tracing::warn!(url, %err, "failed to delete superseded state image");
        }
    }

    /// Creates a city under a state, unique by name within that state.
    ///
    /// # Errors
    /// - [`ApiError::Validation`] when the state id or city name is
    ///   missing, or the name is already taken in that state.
    /// - [`ApiError::ReferenceNotFound`] when the state id does not
    ///   resolve.
    pub async fn create_city(&self, payload: CityPayload) -> Result<City, ApiError> {
        let (Some(state_id), Some(name)) = (payload.state_id, trimmed(payload.city_name)) else {
            return Err(ApiError::Validation(
                "State and city name are required".to_owned(),
            ));
        };
        if self.geo.fetch_state(state_id).await?.is_none() {
            return Err(ApiError::ReferenceNotFound("State"));
        }
        if self.geo.city_name_taken(state_id, &name).await? {
            return Err(ApiError::Validation(
                "City already exists in this state".to_owned(),
            ));
        }
        self.geo.insert_city(state_id, &name).await
    }

    /// Lists all cities, newest first.
    ///
    /// # Errors
    /// [`ApiError::Persistence`] on storage failure.
    pub async fn list_cities(&self) -> Result<Vec<City>, ApiError> {
        self.geo.list_cities().await
    }

    /// Fetches one city.
    ///
    /// # Errors
    /// [`ApiError::EntityNotFound`] when it does not exist.
    pub async fn get_city(&self, id: Uuid) -> Result<City, ApiError> {
        self.geo
            .fetch_city(id)
            .await?
            .ok_or(ApiError::EntityNotFound("City"))
    }

    /// Lists the cities under one state.
    ///
    /// # Errors
    /// [`ApiError::ReferenceNotFound`] when the state does not exist.
    pub async fn cities_by_state(&self, state_id: Uuid) -> Result<Vec<City>, ApiError> {
        if self.geo.fetch_state(state_id).await?.is_none() {
            return Err(ApiError::ReferenceNotFound("State"));
        }
        self.geo.cities_by_state(state_id).await
    }

    /// Renames a city.
    ///
    /// # Errors
    /// [`ApiError::Validation`] on a missing name,
    /// [`ApiError::EntityNotFound`] when the city does not exist.
    pub async fn update_city(&self, id: Uuid, payload: CityPayload) -> Result<City, ApiError> {
        let Some(name) = trimmed(payload.city_name) else {
            return Err(ApiError::Validation("City name is required".to_owned()));
        };
        self.geo
            .update_city(id, &name)
            .await?
            .ok_or(ApiError::EntityNotFound("City"))
    }

    /// Deletes a city.
    ///
    /// # Errors
    /// [`ApiError::EntityNotFound`] when it does not exist.
    pub async fn delete_city(&self, id: Uuid) -> Result<(), ApiError> {
        if self.geo.delete_city(id).await? {
            Ok(())
        } else {
            Err(ApiError::EntityNotFound("City"))
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let t = s.trim();
        (!t.is_empty()).then(|| t.to_owned())
    })
}

fn validate_country_name(name: Option<&str>) -> Result<String, ApiError> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Err(ApiError::Validation("Country name is required".to_owned()));
    };
    let len = name.chars().count();
    if !(COUNTRY_NAME_MIN..=COUNTRY_NAME_MAX).contains(&len) {
        return Err(ApiError::Validation(format!(
            "Country name must be between {COUNTRY_NAME_MIN} and {COUNTRY_NAME_MAX} characters"
        )));
    }
    Ok(name.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::memory::MemoryStore;
    use crate::service::testing::{StubAssets, fields, upload};
    use serde_json::json;

    fn service() -> (Arc<MemoryStore>, GeoService) {
        let store = Arc::new(MemoryStore::new());
        let service = GeoService::new(
            Arc::clone(&store) as Arc<dyn GeoStore>,
            Arc::new(StubAssets::default()),
        );
        (store, service)
    }

    fn country_payload(name: &str) -> CountryPayload {
        CountryPayload {
            country_name: Some(name.to_owned()),
        }
    }

    #[tokio::test]
    async fn country_names_are_unique_case_insensitively() {
        let (_, svc) = service();
        svc.create_country(country_payload("Nepal")).await.unwrap();
        let err = svc
            .create_country(country_payload("  nepal "))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn country_rename_excludes_itself_from_uniqueness() {
        let (_, svc) = service();
        let country = svc.create_country(country_payload("Nepal")).await.unwrap();
        let renamed = svc
            .update_country(country.id, country_payload("NEPAL"))
            .await
            .unwrap();
        assert_eq!(renamed.country_name, "NEPAL");
    }

    #[tokio::test]
    async fn single_character_country_name_is_rejected() {
        let (_, svc) = service();
        let err = svc.create_country(country_payload("X")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn state_create_requires_an_image_file() {
        let (store, svc) = service();
        let country = store.seed_country("India");
        let raw = fields(json!({
            "country": country.id.to_string(),
            "name": "Sikkim",
            "description": "Eastern Himalaya",
        }));
        let err = svc.create_state(raw, vec![]).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn state_create_uploads_and_stores_the_image() {
        let (store, svc) = service();
        let country = store.seed_country("India");
        let raw = fields(json!({
            "country": country.id.to_string(),
            "name": "Sikkim",
            "description": "Eastern Himalaya",
        }));
        let state = svc.create_state(raw, vec![upload("image")]).await.unwrap();
        assert!(state.image.starts_with("https://assets.test/states/"));
        assert_eq!(state.name, "Sikkim");
    }

    #[tokio::test]
    async fn state_create_with_unknown_country_is_not_found() {
        let (_, svc) = service();
        let raw = fields(json!({
            "country": Uuid::new_v4().to_string(),
            "name": "Sikkim",
        }));
        let err = svc.create_state(raw, vec![upload("image")]).await.unwrap_err();
        assert!(matches!(err, ApiError::ReferenceNotFound("Country")));
    }

    #[tokio::test]
    async fn state_update_without_file_keeps_the_image() {
        let (store, svc) = service();
        let country = store.seed_country("India");
        let state = store.seed_state(country.id, "Sikkim");
        let updated = svc
            .update_state(state.id, fields(json!({"name": "West Sikkim"})), vec![])
            .await
            .unwrap();
        assert_eq!(updated.name, "West Sikkim");
        assert_eq!(updated.image, state.image);
    }

    #[tokio::test]
    async fn state_update_with_file_discards_the_old_image() {
        let store = Arc::new(MemoryStore::new());
        let assets = Arc::new(StubAssets::default());
        let svc = GeoService::new(
            Arc::clone(&store) as Arc<dyn GeoStore>,
            Arc::clone(&assets) as Arc<dyn crate::assets::AssetHost>,
        );
        let country = store.seed_country("India");
        let state = store.seed_state(country.id, "Sikkim");
        let updated = svc
            .update_state(state.id, fields(json!({})), vec![upload("image")])
            .await
            .unwrap();
        assert_ne!(updated.image, state.image);
        assert_eq!(*assets.deleted.lock().unwrap(), vec![state.image]);
    }

    #[tokio::test]
    async fn city_names_are_unique_within_a_state() {
        let (store, svc) = service();
        let country = store.seed_country("India");
        let state = store.seed_state(country.id, "Himachal Pradesh");
        let payload = CityPayload {
            state_id: Some(state.id),
            city_name: Some("Manali".to_owned()),
        };
        svc.create_city(payload.clone()).await.unwrap();
        let err = svc.create_city(payload).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn same_city_name_is_fine_in_another_state() {
        let (store, svc) = service();
        let country = store.seed_country("India");
        let first = store.seed_state(country.id, "Himachal Pradesh");
        let second = store.seed_state(country.id, "Uttarakhand");
        for state in [first.id, second.id] {
            svc.create_city(CityPayload {
                state_id: Some(state),
                city_name: Some("Rampur".to_owned()),
            })
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn city_create_with_unknown_state_is_not_found() {
        let (_, svc) = service();
        let err = svc
            .create_city(CityPayload {
                state_id: Some(Uuid::new_v4()),
                city_name: Some("Manali".to_owned()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::ReferenceNotFound("State")));
    }

    #[tokio::test]
    async fn cities_by_state_filters_to_that_state() {
        let (store, svc) = service();
        let country = store.seed_country("India");
        let first = store.seed_state(country.id, "Himachal Pradesh");
        let second = store.seed_state(country.id, "Uttarakhand");
        store.seed_city(first.id, "Manali");
        store.seed_city(first.id, "Kasol");
        store.seed_city(second.id, "Rishikesh");

        let cities = svc.cities_by_state(first.id).await.unwrap();
        assert_eq!(cities.len(), 2);
        assert!(cities.iter().all(|c| c.state_id == first.id));
    }
}
