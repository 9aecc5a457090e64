//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/api`; the health check lives at
//! the root.

pub mod dto;
pub mod form;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document covering every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "atlas-backoffice",
        description = "Travel agency back office: tours, geography, and customer inquiries."
    ),
    paths(
        handlers::tour::create_tour,
        handlers::tour::list_tours,
        handlers::tour::tour_highlights,
        handlers::tour::get_tour,
        handlers::tour::update_tour,
        handlers::tour::delete_tour,
        handlers::geography::create_country,
        handlers::geography::list_countries,
        handlers::geography::get_country,
        handlers::geography::update_country,
        handlers::geography::delete_country,
        handlers::geography::create_state,
        handlers::geography::list_states,
        handlers::geography::get_state,
        handlers::geography::update_state,
        handlers::geography::delete_state,
        handlers::geography::create_city,
        handlers::geography::list_cities,
        handlers::geography::cities_by_state,
        handlers::geography::get_city,
        handlers::geography::update_city,
        handlers::geography::delete_city,
        handlers::inquiry::create_inquiry,
        handlers::inquiry::list_inquiries,
        handlers::inquiry::get_inquiry,
        handlers::inquiry::update_inquiry,
        handlers::inquiry::delete_inquiry,
        handlers::system::health_handler,
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
