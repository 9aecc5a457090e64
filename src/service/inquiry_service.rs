//! Inquiry intake and management.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::inquiry::{Inquiry, InquiryDraft, InquiryPatch};
use crate::error::ApiError;
use crate::persistence::InquiryStore;

/// Service for customer inquiries.
#[derive(Debug, Clone)]
pub struct InquiryService {
    inquiries: Arc<dyn InquiryStore>,
}

impl InquiryService {
    /// Wires the service to its store.
    #[must_use]
    pub fn new(inquiries: Arc<dyn InquiryStore>) -> Self {
        Self { inquiries }
    }

    /// Records a new inquiry. The email is trimmed and lowercased; group
    /// sizes below one are rejected.
    ///
    /// # Errors
    /// [`ApiError::Validation`] on a bad group size,
    /// [`ApiError::Persistence`] when required scalars are missing.
    pub async fn create(&self, mut draft: InquiryDraft) -> Result<Inquiry, ApiError> {
        if let Some(size) = draft.group_size
            && size < 1
        {
            return Err(ApiError::Validation(
                "groupSize must be at least 1".to_owned(),
            ));
        }
        draft.email = draft.email.map(|e| e.trim().to_lowercase());
        self.inquiries.insert_inquiry(draft).await
    }

    /// Lists all inquiries, newest first.
    ///
    /// # Errors
    /// [`ApiError::Persistence`] on storage failure.
    pub async fn list(&self) -> Result<Vec<Inquiry>, ApiError> {
        self.inquiries.list_inquiries().await
    }

    /// Fetches one inquiry.
    ///
    /// # Errors
    /// [`ApiError::EntityNotFound`] when it does not exist.
    pub async fn get(&self, id: Uuid) -> Result<Inquiry, ApiError> {
        self.inquiries
            .fetch_inquiry(id)
            .await?
            .ok_or(ApiError::EntityNotFound("Inquiry"))
    }

    /// Applies a partial update to an inquiry.
    ///
    /// # Errors
    /// As for [`Self::create`], plus [`ApiError::EntityNotFound`].
    pub async fn update(&self, id: Uuid, mut patch: InquiryPatch) -> Result<Inquiry, ApiError> {
        if let Some(size) = patch.group_size
            && size < 1
        {
            return Err(ApiError::Validation(
                "groupSize must be at least 1".to_owned(),
            ));
        }
        patch.email = patch.email.map(|e| e.trim().to_lowercase());
        self.inquiries
            .update_inquiry(id, patch)
            .await?
            .ok_or(ApiError::EntityNotFound("Inquiry"))
    }

    /// Deletes an inquiry.
    ///
    /// # Errors
    /// [`ApiError::EntityNotFound`] when it does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        if self.inquiries.delete_inquiry(id).await? {
            Ok(())
        } else {
            Err(ApiError::EntityNotFound("Inquiry"))
        }
    }
}
