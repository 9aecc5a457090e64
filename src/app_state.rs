//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::{GeoService, InquiryService, TourService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Tour business logic.
    pub tour_service: Arc<TourService>,
    /// Geography business logic.
    pub geo_service: Arc<GeoService>,
    /// Inquiry business logic.
    pub inquiry_service: Arc<InquiryService>,
}
