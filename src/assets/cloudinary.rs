//! Cloudinary-backed [`AssetHost`] implementation.
//!
//! Uploads go to `https://api.cloudinary.com/v1_1/{cloud}/image/upload` as
//! signed multipart requests; deletes derive the public id from the hosted
//! URL and call the `destroy` endpoint. Signatures are the SHA-256 digest
//! of the alphabetically sorted parameters concatenated with the API
//! secret, as required by the host.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{AssetHost, check_size};
use crate::config::AppConfig;
use crate::error::ApiError;

/// HTTP client for the image host.
#[derive(Debug, Clone)]
pub struct CloudinaryHost {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    max_upload_bytes: usize,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryHost {
    /// Builds a host client from the loaded configuration.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            cloud_name: config.asset_cloud_name.clone(),
            api_key: config.asset_api_key.clone(),
            api_secret: config.asset_api_secret.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/{action}",
            self.cloud_name
        )
    }

    /// Signs the given parameters: SHA-256 over `key=value` pairs joined
    /// with `&` in alphabetical key order, with the API secret appended.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
        sorted.sort_by_key(|(key, _)| *key);
        let to_sign: String = sorted
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl AssetHost for CloudinaryHost {
    async fn store(&self, folder: &str, data: Bytes) -> Result<String, ApiError> {
        check_size(&data, self.max_upload_bytes)?;

        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("folder", folder),
            ("signature_algorithm", "sha256"),
            ("timestamp", &timestamp),
        ]);

        let form = reqwest::multipart::Form::new()
            .part("file", reqwest::multipart::Part::bytes(data.to_vec()))
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!("upload failed ({status}): {body}")));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        Ok(parsed.secure_url)
    }

    async fn delete(&self, url: &str) -> Result<(), ApiError> {
        let Some(public_id) = public_id_from_url(url) else {
            // Not one of ours; nothing to clean up.
            return Ok(());
        };

        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("public_id", &public_id),
            ("signature_algorithm", "sha256"),
            ("timestamp", &timestamp),
        ]);

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id.as_str()),
                ("api_key", self.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature_algorithm", "sha256"),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "destroy failed ({})",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Extracts the public id from a hosted URL: the path after the
/// `/upload/v{version}/` segment, minus the file extension.
fn public_id_from_url(url: &str) -> Option<String> {
    let (_, tail) = url.split_once("/upload/")?;
    let rest = tail
        .split_once('/')
        .filter(|(version, _)| {
            version.starts_with('v') && version.chars().skip(1).all(|c| c.is_ascii_digit())
        })
        .map_or(tail, |(_, rest)| rest);
    let trimmed = rest.rsplit_once('.').map_or(rest, |(stem, _)| stem);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_id_strips_version_and_extension() {
        assert_eq!(
            public_id_from_url("https://res.cloudinary.com/demo/image/upload/v1712/tours/peak.jpg"),
            Some("tours/peak".to_string())
        );
    }

    #[test]
    fn public_id_without_version_segment() {
        assert_eq!(
            public_id_from_url("https://res.cloudinary.com/demo/image/upload/tours/peak.jpg"),
            Some("tours/peak".to_string())
        );
    }

    #[test]
    fn foreign_url_yields_no_public_id() {
        assert_eq!(public_id_from_url("https://elsewhere.example/a.jpg"), None);
    }
}
