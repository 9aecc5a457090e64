//! In-memory store used by service-layer tests.
//!
//! Mirrors the behavior of [`super::postgres::PgStore`] closely enough for
//! the services: required-column rejections, partial-update semantics, and
//! the highlight queries.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{GeoStore, InquiryStore, StateDraft, StatePatch, TourStore};
use crate::domain::geography::{City, Country, State};
use crate::domain::inquiry::{Inquiry, InquiryDraft, InquiryPatch};
use crate::domain::tour::{Tour, TourDraft, TourPatch};
use crate::error::ApiError;

/// Process-local store keyed by id, one map per entity.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tours: Mutex<HashMap<Uuid, Tour>>,
    countries: Mutex<HashMap<Uuid, Country>>,
    states: Mutex<HashMap<Uuid, State>>,
    cities: Mutex<HashMap<Uuid, City>>,
    inquiries: Mutex<HashMap<Uuid, Inquiry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tours, for asserting that a rejected create left
    /// nothing behind.
    pub fn tour_count(&self) -> usize {
        self.tours.lock().unwrap().len()
    }

    /// Seeds a country row and returns it.
    pub fn seed_country(&self, name: &str) -> Country {
        let now = Utc::now();
        let country = Country {
            id: Uuid::new_v4(),
            country_name: name.to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.countries
            .lock()
            .unwrap()
            .insert(country.id, country.clone());
        country
    }

    /// Seeds a state row under the given country and returns it.
    pub fn seed_state(&self, country_id: Uuid, name: &str) -> State {
        let now = Utc::now();
        let state = State {
            id: Uuid::new_v4(),
            country_id,
            name: name.to_owned(),
            description: format!("{name} description"),
            image: "https://assets.example.com/state.jpg".to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.states.lock().unwrap().insert(state.id, state.clone());
        state
    }

    /// Seeds a city row under the given state and returns it.
    pub fn seed_city(&self, state_id: Uuid, name: &str) -> City {
        let now = Utc::now();
        let city = City {
            id: Uuid::new_v4(),
            state_id,
            city_name: name.to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.cities.lock().unwrap().insert(city.id, city.clone());
        city
    }
}

fn required<T>(value: Option<T>, column: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| {
        ApiError::Persistence(format!("null value in column \"{column}\" violates not-null constraint"))
    })
}

#[async_trait]
impl TourStore for MemoryStore {
    async fn insert_tour(&self, draft: TourDraft) -> Result<Tour, ApiError> {
        let now = Utc::now();
        let tour = Tour {
            id: Uuid::new_v4(),
            country_id: draft.country_id,
            state_id: draft.state_id,
            city_id: draft.city_id,
            title: required(draft.title, "title")?,
            description: required(draft.description, "description")?,
            difficulty: draft.difficulty,
            duration: required(draft.duration, "duration")?,
            altitude: draft.altitude,
            pickup_points: draft.pickup_points,
            base_camp: draft.base_camp,
            minimum_age: draft.minimum_age,
            best_time_to_visit: draft.best_time_to_visit,
            tour_type: required(draft.tour_type, "tour_type")?,
            tour_star: draft.tour_star.unwrap_or(0),
            summary: draft.summary,
            location: draft.location,
            price: required(draft.price, "price")?,
            discount: draft.discount.unwrap_or(0),
            discounted_price: required(draft.discounted_price, "discounted_price")?,
            packages: draft.packages,
            schedule: draft.schedule,
            gallery: draft.gallery,
            recommended: draft.recommended,
            track_activity: draft.track_activity,
            places_to_be_visited: draft.places_to_be_visited,
            available_dates: draft.available_dates,
            images: draft.images,
            created_at: now,
            updated_at: now,
        };
        self.tours.lock().unwrap().insert(tour.id, tour.clone());
        Ok(tour)
    }

    async fn update_tour(&self, id: Uuid, patch: TourPatch) -> Result<Option<Tour>, ApiError> {
        let mut tours = self.tours.lock().unwrap();
        let Some(tour) = tours.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = patch.country_id {
            tour.country_id = v;
        }
        if let Some(v) = patch.state_id {
            tour.state_id = v;
        }
        if let Some(v) = patch.city_id {
            tour.city_id = v;
        }
        if let Some(v) = patch.title {
            tour.title = v;
        }
        if let Some(v) = patch.description {
            tour.description = v;
        }
        if patch.difficulty.is_some() {
            tour.difficulty = patch.difficulty;
        }
        if let Some(v) = patch.duration {
            tour.duration = v;
        }
        if patch.altitude.is_some() {
            tour.altitude = patch.altitude;
        }
        if patch.pickup_points.is_some() {
            tour.pickup_points = patch.pickup_points;
        }
        if patch.base_camp.is_some() {
            tour.base_camp = patch.base_camp;
        }
        if patch.minimum_age.is_some() {
            tour.minimum_age = patch.minimum_age;
        }
        if patch.best_time_to_visit.is_some() {
            tour.best_time_to_visit = patch.best_time_to_visit;
        }
        if let Some(v) = patch.tour_type {
            tour.tour_type = v;
        }
        if let Some(v) = patch.tour_star {
            tour.tour_star = v;
        }
        if patch.summary.is_some() {
            tour.summary = patch.summary;
        }
        if patch.location.is_some() {
            tour.location = patch.location;
        }
        if let Some(v) = patch.price {
            tour.price = v;
        }
        if let Some(v) = patch.discount {
            tour.discount = v;
        }
        if let Some(v) = patch.discounted_price {
            tour.discounted_price = v;
        }
        if let Some(v) = patch.packages {
            tour.packages = v;
        }
        if let Some(v) = patch.schedule {
            tour.schedule = v;
        }
        if let Some(v) = patch.gallery {
            tour.gallery = v;
        }
        if let Some(v) = patch.recommended {
            tour.recommended = v;
        }
        if let Some(v) = patch.track_activity {
            tour.track_activity = v;
        }
        if let Some(v) = patch.places_to_be_visited {
            tour.places_to_be_visited = v;
        }
        if let Some(v) = patch.available_dates {
            tour.available_dates = v;
        }
        if let Some(v) = patch.images {
            tour.images = v;
        }
        tour.updated_at = Utc::now();
        Ok(Some(tour.clone()))
    }

    async fn fetch_tour(&self, id: Uuid) -> Result<Option<Tour>, ApiError> {
        Ok(self.tours.lock().unwrap().get(&id).cloned())
    }

    async fn list_tours(&self) -> Result<Vec<Tour>, ApiError> {
        let mut tours: Vec<Tour> = self.tours.lock().unwrap().values().cloned().collect();
        tours.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tours)
    }

    async fn delete_tour(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.tours.lock().unwrap().remove(&id).is_some())
    }

    async fn upcoming_tours(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Tour>, ApiError> {
        let tours = self.tours.lock().unwrap();
        let mut upcoming: Vec<(DateTime<Utc>, Tour)> = tours
            .values()
            .filter_map(|tour| {
                tour.available_dates
                    .iter()
                    .filter(|d| **d >= now)
                    .min()
                    .copied()
                    .map(|next| (next, tour.clone()))
            })
            .collect();
        upcoming.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.created_at.cmp(&a.1.created_at)));
        Ok(upcoming
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|(_, tour)| tour)
            .collect())
    }

    async fn discounted_tours(&self, limit: i64) -> Result<Vec<Tour>, ApiError> {
        let tours = self.tours.lock().unwrap();
        let mut discounted: Vec<Tour> = tours
            .values()
            .filter(|tour| tour.discounted_price < tour.price)
            .cloned()
            .collect();
        discounted.sort_by(|a, b| {
            a.discounted_price
                .cmp(&b.discounted_price)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(discounted
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }
}

#[async_trait]
impl GeoStore for MemoryStore {
    async fn insert_country(&self, name: &str) -> Result<Country, ApiError> {
        Ok(self.seed_country(name))
    }

    async fn list_countries(&self) -> Result<Vec<Country>, ApiError> {
        let mut countries: Vec<Country> =
            self.countries.lock().unwrap().values().cloned().collect();
        countries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(countries)
    }

    async fn fetch_country(&self, id: Uuid) -> Result<Option<Country>, ApiError> {
        Ok(self.countries.lock().unwrap().get(&id).cloned())
    }

    async fn country_name_taken(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, ApiError> {
        let countries = self.countries.lock().unwrap();
        Ok(countries.values().any(|c| {
            c.country_name.eq_ignore_ascii_case(name) && Some(c.id) != exclude
        }))
    }

    async fn update_country(&self, id: Uuid, name: &str) -> Result<Option<Country>, ApiError> {
        let mut countries = self.countries.lock().unwrap();
        let Some(country) = countries.get_mut(&id) else {
            return Ok(None);
        };
        country.country_name = name.to_owned();
        country.updated_at = Utc::now();
        Ok(Some(country.clone()))
    }

    async fn delete_country(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.countries.lock().unwrap().remove(&id).is_some())
    }

    async fn insert_state(&self, draft: StateDraft) -> Result<State, ApiError> {
        let now = Utc::now();
        let state = State {
            id: Uuid::new_v4(),
            country_id: draft.country_id,
            name: required(draft.name, "name")?,
            description: required(draft.description, "description")?,
            image: draft.image,
            created_at: now,
            updated_at: now,
        };
        self.states.lock().unwrap().insert(state.id, state.clone());
        Ok(state)
    }

    async fn list_states(&self) -> Result<Vec<State>, ApiError> {
        let mut states: Vec<State> = self.states.lock().unwrap().values().cloned().collect();
        states.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(states)
    }

    async fn fetch_state(&self, id: Uuid) -> Result<Option<State>, ApiError> {
        Ok(self.states.lock().unwrap().get(&id).cloned())
    }

    async fn update_state(&self, id: Uuid, patch: StatePatch) -> Result<Option<State>, ApiError> {
        let mut states = self.states.lock().unwrap();
        let Some(state) = states.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = patch.country_id {
            state.country_id = v;
        }
        if let Some(v) = patch.name {
            state.name = v;
        }
        if let Some(v) = patch.description {
            state.description = v;
        }
        if let Some(v) = patch.image {
            state.image = v;
        }
        state.updated_at = Utc::now();
        Ok(Some(state.clone()))
    }

    async fn delete_state(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.states.lock().unwrap().remove(&id).is_some())
    }

    async fn insert_city(&self, state_id: Uuid, name: &str) -> Result<City, ApiError> {
        Ok(self.seed_city(state_id, name))
    }

    async fn list_cities(&self) -> Result<Vec<City>, ApiError> {
        let mut cities: Vec<City> = self.cities.lock().unwrap().values().cloned().collect();
        cities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cities)
    }

    async fn fetch_city(&self, id: Uuid) -> Result<Option<City>, ApiError> {
        Ok(self.cities.lock().unwrap().get(&id).cloned())
    }

    async fn cities_by_state(&self, state_id: Uuid) -> Result<Vec<City>, ApiError> {
        let mut cities: Vec<City> = self
            .cities
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.state_id == state_id)
            .cloned()
            .collect();
        cities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cities)
    }

    async fn city_name_taken(&self, state_id: Uuid, name: &str) -> Result<bool, ApiError> {
        let cities = self.cities.lock().unwrap();
        Ok(cities
            .values()
            .any(|c| c.state_id == state_id && c.city_name.eq_ignore_ascii_case(name)))
    }

    async fn update_city(&self, id: Uuid, name: &str) -> Result<Option<City>, ApiError> {
        let mut cities = self.cities.lock().unwrap();
        let Some(city) = cities.get_mut(&id) else {
            return Ok(None);
        };
        city.city_name = name.to_owned();
        city.updated_at = Utc::now();
        Ok(Some(city.clone()))
    }

    async fn delete_city(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.cities.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl InquiryStore for MemoryStore {
    async fn insert_inquiry(&self, draft: InquiryDraft) -> Result<Inquiry, ApiError> {
        let now = Utc::now();
        let inquiry = Inquiry {
            id: Uuid::new_v4(),
            fullname: required(draft.fullname, "fullname")?,
            email: required(draft.email, "email")?,
            phone_number: required(draft.phone_number, "phone_number")?,
            inquiry_type: required(draft.inquiry_type, "inquiry_type")?,
            preferred_destination: draft.preferred_destination,
            travel_dates: draft.travel_dates,
            group_size: draft.group_size,
            budget_range: draft.budget_range,
            message: draft.message,
            created_at: now,
            updated_at: now,
        };
        self.inquiries
            .lock()
            .unwrap()
            .insert(inquiry.id, inquiry.clone());
        Ok(inquiry)
    }

    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, ApiError> {
        let mut inquiries: Vec<Inquiry> =
            self.inquiries.lock().unwrap().values().cloned().collect();
        inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(inquiries)
    }

    async fn fetch_inquiry(&self, id: Uuid) -> Result<Option<Inquiry>, ApiError> {
        Ok(self.inquiries.lock().unwrap().get(&id).cloned())
    }

    async fn update_inquiry(
        &self,
        id: Uuid,
        patch: InquiryPatch,
    ) -> Result<Option<Inquiry>, ApiError> {
        let mut inquiries = self.inquiries.lock().unwrap();
        let Some(inquiry) = inquiries.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = patch.fullname {
            inquiry.fullname = v;
        }
        if let Some(v) = patch.email {
            inquiry.email = v;
        }
        if let Some(v) = patch.phone_number {
            inquiry.phone_number = v;
        }
        if let Some(v) = patch.inquiry_type {
            inquiry.inquiry_type = v;
        }
        if patch.preferred_destination.is_some() {
            inquiry.preferred_destination = patch.preferred_destination;
        }
        if patch.travel_dates.is_some() {
            inquiry.travel_dates = patch.travel_dates;
        }
        if patch.group_size.is_some() {
            inquiry.group_size = patch.group_size;
        }
        if patch.budget_range.is_some() {
            inquiry.budget_range = patch.budget_range;
        }
        if patch.message.is_some() {
            inquiry.message = patch.message;
        }
        inquiry.updated_at = Utc::now();
        Ok(Some(inquiry.clone()))
    }

    async fn delete_inquiry(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.inquiries.lock().unwrap().remove(&id).is_some())
    }
}
