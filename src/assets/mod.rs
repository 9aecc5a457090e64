//! Asset host integration: store an image buffer, get back a stable URL.
//!
//! The back office never serves binaries itself. Uploaded files are pushed
//! to a third-party image host and only the returned URLs are persisted.
//! [`AssetHost`] is the seam the services depend on; [`CloudinaryHost`] is
//! the production implementation.

pub mod cloudinary;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ApiError;

pub use cloudinary::CloudinaryHost;

/// External image storage: store a buffer under a folder and get back a
/// stable URL, or delete a previously stored asset by its URL.
#[async_trait]
pub trait AssetHost: Send + Sync + std::fmt::Debug {
    /// Uploads an image buffer and returns its hosted URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Upstream`] when the host rejects or fails the
    /// upload.
    async fn store(&self, folder: &str, data: Bytes) -> Result<String, ApiError>;

    /// Deletes a previously stored asset by its hosted URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Upstream`] on host failure.
    async fn delete(&self, url: &str) -> Result<(), ApiError>;
}

/// Rejects a buffer larger than the configured per-file limit before any
/// network call is made.
pub(crate) fn check_size(data: &Bytes, max_bytes: usize) -> Result<(), ApiError> {
    if data.len() > max_bytes {
        return Err(ApiError::Validation(
            "File size exceeds the maximum allowed limit".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversize_buffer_is_rejected_locally() {
        let data = Bytes::from(vec![0u8; 32]);
        assert!(check_size(&data, 16).is_err());
        assert!(check_size(&data, 32).is_ok());
    }
}
