//! PostgreSQL implementation of the store traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{GeoStore, InquiryStore, StateDraft, StatePatch, TourStore};
use crate::domain::geography::{City, Country, State};
use crate::domain::inquiry::{Inquiry, InquiryDraft, InquiryPatch};
use crate::domain::tour::{Tour, TourDraft, TourPatch};
use crate::error::ApiError;

/// PostgreSQL-backed store over a shared `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TourStore for PgStore {
    async fn insert_tour(&self, draft: TourDraft) -> Result<Tour, ApiError> {
        let tour = sqlx::query_as::<_, Tour>(
            "INSERT INTO tours (id, country_id, state_id, city_id, title, description, \
             difficulty, duration, altitude, pickup_points, base_camp, minimum_age, \
             best_time_to_visit, tour_type, tour_star, summary, location, price, discount, \
             discounted_price, packages, schedule, gallery, recommended, track_activity, \
             places_to_be_visited, available_dates, images) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(draft.country_id)
        .bind(draft.state_id)
        .bind(draft.city_id)
        .bind(draft.title)
        .bind(draft.description)
        .bind(draft.difficulty)
        .bind(draft.duration)
        .bind(draft.altitude)
        .bind(draft.pickup_points)
        .bind(draft.base_camp)
        .bind(draft.minimum_age)
        .bind(draft.best_time_to_visit)
        .bind(draft.tour_type)
        .bind(draft.tour_star.unwrap_or(0))
        .bind(draft.summary)
        .bind(draft.location)
        .bind(draft.price)
        .bind(draft.discount.unwrap_or(0))
        .bind(draft.discounted_price)
        .bind(draft.packages)
        .bind(draft.schedule)
        .bind(draft.gallery)
        .bind(draft.recommended)
        .bind(draft.track_activity)
        .bind(draft.places_to_be_visited)
        .bind(draft.available_dates)
        .bind(draft.images)
        .fetch_one(&self.pool)
        .await?;
        Ok(tour)
    }

    async fn update_tour(&self, id: Uuid, patch: TourPatch) -> Result<Option<Tour>, ApiError> {
        let tour = sqlx::query_as::<_, Tour>(
            "UPDATE tours SET \
             country_id = COALESCE($2, country_id), \
             state_id = COALESCE($3, state_id), \
             city_id = COALESCE($4, city_id), \
             title = COALESCE($5, title), \
             description = COALESCE($6, description), \
             difficulty = COALESCE($7, difficulty), \
             duration = COALESCE($8, duration), \
             altitude = COALESCE($9, altitude), \
             pickup_points = COALESCE($10, pickup_points), \
             base_camp = COALESCE($11, base_camp), \
             minimum_age = COALESCE($12, minimum_age), \
             best_time_to_visit = COALESCE($13, best_time_to_visit), \
             tour_type = COALESCE($14, tour_type), \
             tour_star = COALESCE($15, tour_star), \
             summary = COALESCE($16, summary), \
             location = COALESCE($17, location), \
             price = COALESCE($18, price), \
             discount = COALESCE($19, discount), \
             discounted_price = COALESCE($20, discounted_price), \
             packages = COALESCE($21, packages), \
             schedule = COALESCE($22, schedule), \
             gallery = COALESCE($23, gallery), \
             recommended = COALESCE($24, recommended), \
             track_activity = COALESCE($25, track_activity), \
             places_to_be_visited = COALESCE($26, places_to_be_visited), \
             available_dates = COALESCE($27, available_dates), \
             images = COALESCE($28, images), \
             updated_at = now() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(patch.country_id)
        .bind(patch.state_id)
        .bind(patch.city_id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.difficulty)
        .bind(patch.duration)
        .bind(patch.altitude)
        .bind(patch.pickup_points)
        .bind(patch.base_camp)
        .bind(patch.minimum_age)
        .bind(patch.best_time_to_visit)
        .bind(patch.tour_type)
        .bind(patch.tour_star)
        .bind(patch.summary)
        .bind(patch.location)
        .bind(patch.price)
        .bind(patch.discount)
        .bind(patch.discounted_price)
        .bind(patch.packages)
        .bind(patch.schedule)
        .bind(patch.gallery)
        .bind(patch.recommended)
        .bind(patch.track_activity)
        .bind(patch.places_to_be_visited)
        .bind(patch.available_dates)
        .bind(patch.images)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tour)
    }

    async fn fetch_tour(&self, id: Uuid) -> Result<Option<Tour>, ApiError> {
        let tour = sqlx::query_as::<_, Tour>("SELECT * FROM tours WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tour)
    }

    async fn list_tours(&self) -> Result<Vec<Tour>, ApiError> {
        let tours = sqlx::query_as::<_, Tour>("SELECT * FROM tours ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(tours)
    }

    async fn delete_tour(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn upcoming_tours(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Tour>, ApiError> {
        let tours = sqlx::query_as::<_, Tour>(
            "SELECT * FROM tours \
             WHERE EXISTS (SELECT 1 FROM unnest(available_dates) AS d WHERE d >= $1) \
             ORDER BY (SELECT min(d) FROM unnest(available_dates) AS d WHERE d >= $1) ASC, \
             created_at DESC \
             LIMIT $2",
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(tours)
    }

    async fn discounted_tours(&self, limit: i64) -> Result<Vec<Tour>, ApiError> {
        let tours = sqlx::query_as::<_, Tour>(
            "SELECT * FROM tours WHERE discounted_price < price \
             ORDER BY discounted_price ASC, created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(tours)
    }
}

#[async_trait]
impl GeoStore for PgStore {
    async fn insert_country(&self, name: &str) -> Result<Country, ApiError> {
        let country = sqlx::query_as::<_, Country>(
            "INSERT INTO countries (id, country_name) VALUES ($1, $2) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(country)
    }

    async fn list_countries(&self) -> Result<Vec<Country>, ApiError> {
        let countries =
            sqlx::query_as::<_, Country>("SELECT * FROM countries ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(countries)
    }

    async fn fetch_country(&self, id: Uuid) -> Result<Option<Country>, ApiError> {
        let country = sqlx::query_as::<_, Country>("SELECT * FROM countries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(country)
    }

    async fn country_name_taken(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, ApiError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM countries \
             WHERE lower(country_name) = lower($1) AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn update_country(&self, id: Uuid, name: &str) -> Result<Option<Country>, ApiError> {
        let country = sqlx::query_as::<_, Country>(
            "UPDATE countries SET country_name = $2, updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(country)
    }

    async fn delete_country(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM countries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_state(&self, draft: StateDraft) -> Result<State, ApiError> {
        let state = sqlx::query_as::<_, State>(
            "INSERT INTO states (id, country_id, name, description, image) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(draft.country_id)
        .bind(draft.name)
        .bind(draft.description)
        .bind(draft.image)
        .fetch_one(&self.pool)
        .await?;
        Ok(state)
    }

    async fn list_states(&self) -> Result<Vec<State>, ApiError> {
        let states = sqlx::query_as::<_, State>("SELECT * FROM states ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(states)
    }

    async fn fetch_state(&self, id: Uuid) -> Result<Option<State>, ApiError> {
        let state = sqlx::query_as::<_, State>("SELECT * FROM states WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(state)
    }

    async fn update_state(&self, id: Uuid, patch: StatePatch) -> Result<Option<State>, ApiError> {
        let state = sqlx::query_as::<_, State>(
            "UPDATE states SET \
             country_id = COALESCE($2, country_id), \
             name = COALESCE($3, name), \
             description = COALESCE($4, description), \
             image = COALESCE($5, image), \
             updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(patch.country_id)
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.image)
        .fetch_optional(&self.pool)
        .await?;
        Ok(state)
    }

    async fn delete_state(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM states WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_city(&self, state_id: Uuid, name: &str) -> Result<City, ApiError> {
        let city = sqlx::query_as::<_, City>(
            "INSERT INTO cities (id, state_id, city_name) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(state_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(city)
    }

    async fn list_cities(&self) -> Result<Vec<City>, ApiError> {
        let cities = sqlx::query_as::<_, City>("SELECT * FROM cities ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(cities)
    }

    async fn fetch_city(&self, id: Uuid) -> Result<Option<City>, ApiError> {
        let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(city)
    }

    async fn cities_by_state(&self, state_id: Uuid) -> Result<Vec<City>, ApiError> {
        let cities = sqlx::query_as::<_, City>(
            "SELECT * FROM cities WHERE state_id = $1 ORDER BY created_at DESC",
        )
        .bind(state_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(cities)
    }

    async fn city_name_taken(&self, state_id: Uuid, name: &str) -> Result<bool, ApiError> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM cities \
             WHERE state_id = $1 AND lower(city_name) = lower($2))",
        )
        .bind(state_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn update_city(&self, id: Uuid, name: &str) -> Result<Option<City>, ApiError> {
        let city = sqlx::query_as::<_, City>(
            "UPDATE cities SET city_name = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(city)
    }

    async fn delete_city(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl InquiryStore for PgStore {
    async fn insert_inquiry(&self, draft: InquiryDraft) -> Result<Inquiry, ApiError> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            "INSERT INTO inquiries (id, fullname, email, phone_number, inquiry_type, \
             preferred_destination, travel_dates, group_size, budget_range, message) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(draft.fullname)
        .bind(draft.email)
        .bind(draft.phone_number)
        .bind(draft.inquiry_type)
        .bind(draft.preferred_destination)
        .bind(draft.travel_dates)
        .bind(draft.group_size)
        .bind(draft.budget_range)
        .bind(draft.message)
        .fetch_one(&self.pool)
        .await?;
        Ok(inquiry)
    }

    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, ApiError> {
        let inquiries =
            sqlx::query_as::<_, Inquiry>("SELECT * FROM inquiries ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(inquiries)
    }

    async fn fetch_inquiry(&self, id: Uuid) -> Result<Option<Inquiry>, ApiError> {
        let inquiry = sqlx::query_as::<_, Inquiry>("SELECT * FROM inquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(inquiry)
    }

    async fn update_inquiry(
        &self,
        id: Uuid,
        patch: InquiryPatch,
    ) -> Result<Option<Inquiry>, ApiError> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            "UPDATE inquiries SET \
             fullname = COALESCE($2, fullname), \
             email = COALESCE($3, email), \
             phone_number = COALESCE($4, phone_number), \
             inquiry_type = COALESCE($5, inquiry_type), \
             preferred_destination = COALESCE($6, preferred_destination), \
             travel_dates = COALESCE($7, travel_dates), \
             group_size = COALESCE($8, group_size), \
             budget_range = COALESCE($9, budget_range), \
             message = COALESCE($10, message), \
             updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(patch.fullname)
        .bind(patch.email)
        .bind(patch.phone_number)
        .bind(patch.inquiry_type)
        .bind(patch.preferred_destination)
        .bind(patch.travel_dates)
        .bind(patch.group_size)
        .bind(patch.budget_range)
        .bind(patch.message)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inquiry)
    }

    async fn delete_inquiry(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
