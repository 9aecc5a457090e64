//! Inquiry endpoint handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::MessageResponse;
use crate::app_state::AppState;
use crate::domain::{Inquiry, InquiryDraft, InquiryPatch};
use crate::error::{ApiError, ErrorResponse};

/// `POST /api/inquiry` — Record an inquiry.
///
/// # Errors
///
/// Returns [`ApiError`] on a bad group size or missing required fields.
#[utoipa::path(
    post,
    path = "/api/inquiry",
    tag = "Inquiries",
    summary = "Record an inquiry",
    request_body = InquiryDraft,
    responses(
        (status = 201, description = "Inquiry recorded", body = Inquiry),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
    )
)]
pub async fn create_inquiry(
    State(state): State<AppState>,
    Json(draft): Json<InquiryDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let inquiry = state.inquiry_service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// `GET /api/inquiry` — List inquiries.
///
/// # Errors
///
/// Returns [`ApiError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/inquiry",
    tag = "Inquiries",
    summary = "List inquiries",
    responses((status = 200, description = "All inquiries", body = Vec<Inquiry>))
)]
pub async fn list_inquiries(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.inquiry_service.list().await?))
}

/// `GET /api/inquiry/{id}` — Get one inquiry.
///
/// # Errors
///
/// Returns [`ApiError::EntityNotFound`] if the inquiry does not exist.
#[utoipa::path(
    get,
    path = "/api/inquiry/{id}",
    tag = "Inquiries",
    summary = "Get an inquiry",
    params(("id" = Uuid, Path, description = "Inquiry id")),
    responses(
        (status = 200, description = "The inquiry", body = Inquiry),
        (status = 404, description = "Inquiry not found", body = ErrorResponse),
    )
)]
pub async fn get_inquiry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.inquiry_service.get(id).await?))
}

/// `PUT /api/inquiry/{id}` — Partially update an inquiry.
///
/// # Errors
///
/// Returns [`ApiError`] on an unknown inquiry or invalid fields.
#[utoipa::path(
    put,
    path = "/api/inquiry/{id}",
    tag = "Inquiries",
    summary = "Update an inquiry",
    request_body = InquiryPatch,
    params(("id" = Uuid, Path, description = "Inquiry id")),
    responses(
        (status = 200, description = "Updated inquiry", body = Inquiry),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "Inquiry not found", body = ErrorResponse),
    )
)]
pub async fn update_inquiry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<InquiryPatch>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.inquiry_service.update(id, patch).await?))
}

/// `DELETE /api/inquiry/{id}` — Delete an inquiry.
///
/// # Errors
///
/// Returns [`ApiError::EntityNotFound`] if the inquiry does not exist.
#[utoipa::path(
    delete,
    path = "/api/inquiry/{id}",
    tag = "Inquiries",
    summary = "Delete an inquiry",
    params(("id" = Uuid, Path, description = "Inquiry id")),
    responses(
        (status = 200, description = "Inquiry deleted", body = MessageResponse),
        (status = 404, description = "Inquiry not found", body = ErrorResponse),
    )
)]
pub async fn delete_inquiry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.inquiry_service.delete(id).await?;
    Ok(Json(MessageResponse::deleted("Inquiry")))
}

/// Inquiry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/inquiry", get(list_inquiries).post(create_inquiry))
        .route(
            "/inquiry/{id}",
            get(get_inquiry).put(update_inquiry).delete(delete_inquiry),
        )
}
