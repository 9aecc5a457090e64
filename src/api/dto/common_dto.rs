//! Envelopes shared across resources.

use serde::Serialize;
use utoipa::ToSchema;

/// Confirmation body for delete endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Builds the standard "`<Entity>` deleted successfully" confirmation.
    #[must_use]
    pub fn deleted(entity: &str) -> Self {
        Self {
            message: format!("{entity} deleted successfully"),
        }
    }
}
