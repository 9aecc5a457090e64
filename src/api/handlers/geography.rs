//! Geography endpoint handlers: countries, states, cities.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::MessageResponse;
use crate::api::form::RawForm;
use crate::app_state::AppState;
use crate::domain::{City, Country, State as GeoState};
use crate::error::{ApiError, ErrorResponse};
use crate::service::{CityPayload, CountryPayload};

/// `POST /api/country` — Create a country.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] on a missing, out-of-range, or
/// duplicate name.
#[utoipa::path(
    post,
    path = "/api/country",
    tag = "Geography",
    summary = "Create a country",
    request_body = CountryPayload,
    responses(
        (status = 201, description = "Country created", body = Country),
        (status = 400, description = "Invalid or duplicate name", body = ErrorResponse),
    )
)]
pub async fn create_country(
    State(state): State<AppState>,
    Json(payload): Json<CountryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let country = state.geo_service.create_country(payload).await?;
    Ok((StatusCode::CREATED, Json(country)))
}

/// `GET /api/country` — List countries.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/country",
    tag = "Geography",
    summary = "List countries",
    responses((status = 200, description = "All countries", body = Vec<Country>))
)]
pub async fn list_countries(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.geo_service.list_countries().await?))
}

/// `GET /api/country/{id}` — Get one country.
///
/// # Errors
///
/// Returns [`ApiError::EntityNotFound`] if the country does not exist.
#[utoipa::path(
    get,
    path = "/api/country/{id}",
    tag = "Geography",
    summary = "Get a country",
    params(("id" = Uuid, Path, description = "Country id")),
    responses(
        (status = 200, description = "The country", body = Country),
        (status = 404, description = "Country not found", body = ErrorResponse),
    )
)]
pub async fn get_country(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.geo_service.get_country(id).await?))
}

/// `PUT /api/country/{id}` — Rename a country.
///
/// # Errors
///
/// Returns [`ApiError`] on an unknown country or an invalid/duplicate
/// name.
#[utoipa::path(
    put,
    path = "/api/country/{id}",
    tag = "Geography",
    summary = "Rename a country",
    request_body = CountryPayload,
    params(("id" = Uuid, Path, description = "Country id")),
    responses(
        (status = 200, description = "Updated country", body = Country),
        (status = 400, description = "Invalid or duplicate name", body = ErrorResponse),
        (status = 404, description = "Country not found", body = ErrorResponse),
    )
)]
pub async fn update_country(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CountryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.geo_service.update_country(id, payload).await?))
}

/// `DELETE /api/country/{id}` — Delete a country.
///
/// # Errors
///
/// Returns [`ApiError::EntityNotFound`] if the country does not exist.
#[utoipa::path(
    delete,
    path = "/api/country/{id}",
    tag = "Geography",
    summary = "Delete a country",
    params(("id" = Uuid, Path, description = "Country id")),
    responses(
        (status = 200, description = "Country deleted", body = MessageResponse),
        (status = 404, description = "Country not found", body = ErrorResponse),
    )
)]
pub async fn delete_country(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.geo_service.delete_country(id).await?;
    Ok(Json(MessageResponse::deleted("Country")))
}

/// `POST /api/state` — Create a state with its image.
///
/// # Errors
///
/// Returns [`ApiError`] on a missing country reference or image file.
#[utoipa::path(
    post,
    path = "/api/state",
    tag = "Geography",
    summary = "Create a state",
    description = "Multipart payload: `country`, `name`, `description` text fields plus a mandatory `image` file.",
    responses(
        (status = 201, description = "State created", body = GeoState),
        (status = 400, description = "Missing fields or image", body = ErrorResponse),
        (status = 404, description = "Country not found", body = ErrorResponse),
    )
)]
pub async fn create_state(
    State(state): State<AppState>,
    form: RawForm,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.geo_service.create_state(form.fields, form.files).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/state` — List states.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/state",
    tag = "Geography",
    summary = "List states",
    responses((status = 200, description = "All states", body = Vec<GeoState>))
)]
pub async fn list_states(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.geo_service.list_states().await?))
}

/// `GET /api/state/{id}` — Get one state.
///
/// # Errors
///
/// Returns [`ApiError::EntityNotFound`] if the state does not exist.
#[utoipa::path(
    get,
    path = "/api/state/{id}",
    tag = "Geography",
    summary = "Get a state",
    params(("id" = Uuid, Path, description = "State id")),
    responses(
        (status = 200, description = "The state", body = GeoState),
        (status = 404, description = "State not found", body = ErrorResponse),
    )
)]
pub async fn get_state(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.geo_service.get_state(id).await?))
}

/// `PUT /api/state/{id}` — Partially update a state.
///
/// # Errors
///
/// Returns [`ApiError`] on an unknown state or country reference.
#[utoipa::path(
    put,
    path = "/api/state/{id}",
    tag = "Geography",
    summary = "Update a state",
    description = "Multipart or JSON. A new `image` file replaces the stored URL; otherwise it is kept.",
    params(("id" = Uuid, Path, description = "State id")),
    responses(
        (status = 200, description = "Updated state", body = GeoState),
        (status = 404, description = "State or country not found", body = ErrorResponse),
    )
)]
pub async fn update_state(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    form: RawForm,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .geo_service
        .update_state(id, form.fields, form.files)
        .await?;
    Ok(Json(updated))
}

/// `DELETE /api/state/{id}` — Delete a state.
///
/// # Errors
///
/// Returns [`ApiError::EntityNotFound`] if the state does not exist.
#[utoipa::path(
    delete,
    path = "/api/state/{id}",
    tag = "Geography",
    summary = "Delete a state",
    params(("id" = Uuid, Path, description = "State id")),
    responses(
        (status = 200, description = "State deleted", body = MessageResponse),
        (status = 404, description = "State not found", body = ErrorResponse),
    )
)]
pub async fn delete_state(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.geo_service.delete_state(id).await?;
    Ok(Json(MessageResponse::deleted("State")))
}

/// `POST /api/city` — Create a city.
///
/// # Errors
///
/// Returns [`ApiError`] on missing fields, an unknown state, or a
/// duplicate name within the state.
#[utoipa::path(
    post,
    path = "/api/city",
    tag = "Geography",
    summary = "Create a city",
    request_body = CityPayload,
    responses(
        (status = 201, description = "City created", body = City),
        (status = 400, description = "Missing fields or duplicate name", body = ErrorResponse),
        (status = 404, description = "State not found", body = ErrorResponse),
    )
)]
pub async fn create_city(
    State(state): State<AppState>,
    Json(payload): Json<CityPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let city = state.geo_service.create_city(payload).await?;
    Ok((StatusCode::CREATED, Json(city)))
}

/// `GET /api/city` — List cities.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/city",
    tag = "Geography",
    summary = "List cities",
    responses((status = 200, description = "All cities", body = Vec<City>))
)]
pub async fn list_cities(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.geo_service.list_cities().await?))
}

/// `GET /api/city/state/{stateId}` — List the cities of one state.
///
/// # Errors
///
/// Returns [`ApiError::ReferenceNotFound`] if the state does not exist.
#[utoipa::path(
    get,
    path = "/api/city/state/{stateId}",
    tag = "Geography",
    summary = "List cities of a state",
    params(("stateId" = Uuid, Path, description = "State id")),
    responses(
        (status = 200, description = "Cities in the state", body = Vec<City>),
        (status = 404, description = "State not found", body = ErrorResponse),
    )
)]
pub async fn cities_by_state(
    State(state): State<AppState>,
    Path(state_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.geo_service.cities_by_state(state_id).await?))
}

/// `GET /api/city/{id}` — Get one city.
///
/// # Errors
///
/// Returns [`ApiError::EntityNotFound`] if the city does not exist.
#[utoipa::path(
    get,
    path = "/api/city/{id}",
    tag = "Geography",
    summary = "Get a city",
    params(("id" = Uuid, Path, description = "City id")),
    responses(
        (status = 200, description = "The city", body = City),
        (status = 404, description = "City not found", body = ErrorResponse),
    )
)]
pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.geo_service.get_city(id).await?))
}

/// `PUT /api/city/{id}` — Rename a city.
///
/// # Errors
///
/// Returns [`ApiError`] on an unknown city or a missing name.
#[utoipa::path(
    put,
    path = "/api/city/{id}",
    tag = "Geography",
    summary = "Rename a city",
    request_body = CityPayload,
    params(("id" = Uuid, Path, description = "City id")),
    responses(
        (status = 200, description = "Updated city", body = City),
        (status = 400, description = "Missing name", body = ErrorResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
    )
)]
pub async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CityPayload>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.geo_service.update_city(id, payload).await?))
}

/// `DELETE /api/city/{id}` — Delete a city.
///
/// # Errors
///
/// Returns [`ApiError::EntityNotFound`] if the city does not exist.
#[utoipa::path(
    delete,
    path = "/api/city/{id}",
    tag = "Geography",
    summary = "Delete a city",
    params(("id" = Uuid, Path, description = "City id")),
    responses(
        (status = 200, description = "City deleted", body = MessageResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
    )
)]
pub async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.geo_service.delete_city(id).await?;
    Ok(Json(MessageResponse::deleted("City")))
}

/// Geography routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/country", get(list_countries).post(create_country))
        .route(
            "/country/{id}",
            get(get_country).put(update_country).delete(delete_country),
        )
        .route("/state", get(list_states).post(create_state))
        .route(
            "/state/{id}",
            get(get_state).put(update_state).delete(delete_state),
        )
        .route("/city", get(list_cities).post(create_city))
        .route("/city/state/{stateId}", get(cities_by_state))
        .route(
            "/city/{id}",
            get(get_city).put(update_city).delete(delete_city),
        )
}
