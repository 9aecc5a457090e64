//! Request body extractor for endpoints that accept both JSON and
//! multipart payloads.
//!
//! Admin tooling submits tours and states as `multipart/form-data` when
//! files ride along, and as plain JSON otherwise. Both decode into the
//! same raw field map that the services normalize.

use axum::Json;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;

use crate::domain::normalize::FieldMap;
use crate::error::ApiError;
use crate::service::UploadedFile;

/// A decoded request body: text fields plus any uploaded files.
#[derive(Debug, Default)]
pub struct RawForm {
    /// Text/structured fields keyed by form name.
    pub fields: FieldMap,
    /// Files keyed by the field they arrived under.
    pub files: Vec<UploadedFile>,
}

impl<S> FromRequest<S> for RawForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::Validation(format!("malformed multipart body: {e}")))?;
            let mut fields = FieldMap::new();
            let mut files = Vec::new();
            while let Some(part) = multipart
                .next_field()
                .await
                .map_err(|e| ApiError::Validation(format!("malformed multipart body: {e}")))?
            {
                let name = part.name().unwrap_or_default().to_owned();
                if name.is_empty() {
                    continue;
                }
                if part.file_name().is_some() {
                    let bytes = part
                        .bytes()
                        .await
                        .map_err(|e| ApiError::Validation(format!("failed reading upload: {e}")))?;
                    files.push(UploadedFile { field: name, bytes });
                } else {
                    let text = part
                        .text()
                        .await
                        .map_err(|e| ApiError::Validation(format!("failed reading field: {e}")))?;
                    insert_field(&mut fields, name, Value::String(text));
                }
            }
            Ok(Self { fields, files })
        } else {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Validation(format!("invalid JSON body: {e}")))?;
            match value {
                Value::Object(fields) => Ok(Self {
                    fields,
                    files: Vec::new(),
                }),
                _ => Err(ApiError::Validation(
                    "request body must be a JSON object".to_owned(),
                )),
            }
        }
    }
}

/// Repeated form keys accumulate into an array, matching how form
/// serializers send multi-valued fields.
fn insert_field(fields: &mut FieldMap, name: String, value: Value) {
    match fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(name, value);
        }
    }
}
