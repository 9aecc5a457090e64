//! Tour endpoint handlers: create, list, highlights, get, update, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::MessageResponse;
use crate::api::form::RawForm;
use crate::app_state::AppState;
use crate::domain::Tour;
use crate::error::{ApiError, ErrorResponse};
use crate::service::{PopulatedTour, TourHighlights};

/// `POST /api/tour` — Create a tour.
///
/// # Errors
///
/// Returns [`ApiError`] on missing geography, missing images, or
/// malformed fields.
#[utoipa::path(
    post,
    path = "/api/tour",
    tag = "Tours",
    summary = "Create a tour",
    description = "Accepts multipart/form-data (files plus text fields) or plain JSON. Nested collections may arrive as JSON documents, JSON text, or flat bracket-indexed keys; all are normalized to one canonical shape. At least one `images` file is required.",
    responses(
        (status = 201, description = "Tour created", body = Tour),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 404, description = "Geography reference not found", body = ErrorResponse),
    )
)]
pub async fn create_tour(
    State(state): State<AppState>,
    form: RawForm,
) -> Result<impl IntoResponse, ApiError> {
    let tour = state.tour_service.create(form.fields, form.files).await?;
    Ok((StatusCode::CREATED, Json(tour)))
}

/// `GET /api/tour` — List all tours.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/tour",
    tag = "Tours",
    summary = "List tours",
    description = "Returns every tour, newest first, with country, state, and city populated.",
    responses(
        (status = 200, description = "All tours", body = Vec<PopulatedTour>),
    )
)]
pub async fn list_tours(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tours = state.tour_service.list().await?;
    Ok(Json(tours))
}

/// `GET /api/tour/highlights` — Landing-page highlight lists.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/tour/highlights",
    tag = "Tours",
    summary = "Tour highlights",
    description = "Returns up to ten upcoming tours (soonest departure first) and up to ten currently discounted tours (deepest discount first).",
    responses(
        (status = 200, description = "Highlight lists", body = TourHighlights),
    )
)]
pub async fn tour_highlights(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let highlights = state.tour_service.highlights().await?;
    Ok(Json(highlights))
}

/// `GET /api/tour/{id}` — Get one tour.
///
/// # Errors
///
/// Returns [`ApiError::EntityNotFound`] if the tour does not exist.
#[utoipa::path(
    get,
    path = "/api/tour/{id}",
    tag = "Tours",
    summary = "Get a tour",
    params(("id" = Uuid, Path, description = "Tour id")),
    responses(
        (status = 200, description = "The tour", body = PopulatedTour),
        (status = 404, description = "Tour not found", body = ErrorResponse),
    )
)]
pub async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let tour = state.tour_service.get(id).await?;
    Ok(Json(tour))
}

/// `PUT /api/tour/{id}` — Partially update a tour.
///
/// # Errors
///
/// Returns [`ApiError`] on an unknown tour, bad geography, or malformed
/// fields.
#[utoipa::path(
    put,
    path = "/api/tour/{id}",
    tag = "Tours",
    summary = "Update a tour",
    description = "Accepts the same dual-encoding body as create. Only supplied fields change; nested collections absent from the payload keep their stored value.",
    params(("id" = Uuid, Path, description = "Tour id")),
    responses(
        (status = 200, description = "Updated tour", body = Tour),
        (status = 400, description = "Malformed fields", body = ErrorResponse),
        (status = 404, description = "Tour or geography reference not found", body = ErrorResponse),
    )
)]
pub async fn update_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    form: RawForm,
) -> Result<impl IntoResponse, ApiError> {
    let tour = state
        .tour_service
        .update(id, form.fields, form.files)
        .await?;
    Ok(Json(tour))
}

/// `DELETE /api/tour/{id}` — Delete a tour.
///
/// # Errors
///
/// Returns [`ApiError::EntityNotFound`] if the tour does not exist.
#[utoipa::path(
    delete,
    path = "/api/tour/{id}",
    tag = "Tours",
    summary = "Delete a tour",
    params(("id" = Uuid, Path, description = "Tour id")),
    responses(
        (status = 200, description = "Tour deleted", body = MessageResponse),
        (status = 404, description = "Tour not found", body = ErrorResponse),
    )
)]
pub async fn delete_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.tour_service.delete(id).await?;
    Ok(Json(MessageResponse::deleted("Tour")))
}

/// Tour routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tour", get(list_tours).post(create_tour))
        .route("/tour/highlights", get(tour_highlights))
        .route(
            "/tour/{id}",
            get(get_tour).put(update_tour).delete(delete_tour),
        )
}
