//! REST endpoint handlers organized by resource.

pub mod geography;
pub mod inquiry;
pub mod system;
pub mod tour;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(tour::routes())
        .merge(geography::routes())
        .merge(inquiry::routes())
}
