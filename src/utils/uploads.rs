//! Profile image storage and the JSON-or-multipart body parser used by the
//! self-service profile endpoints.
//!
//! Uploaded images live in a single shared directory and are referenced by
//! their public path (`/uploads/<file>`) from the profile record. Files are
//! allow-listed by MIME type *and* extension and capped at 5 MB.

use std::path::Path;

use axum::extract::{FromRequest, Multipart, Request};
use axum::Json;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::fs;
use uuid::Uuid;

use crate::config::uploads::UploadConfig;
use crate::utils::errors::AppError;

const ALLOWED_MIME: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];
const ALLOWED_EXT: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// The multipart field name carrying the image.
pub const IMAGE_FIELD: &str = "profile_image";

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Validate and persist an uploaded profile image. Returns the public path
/// stored on the profile record.
pub async fn save_profile_image(
    config: &UploadConfig,
    prefix: &str,
    user_id: Uuid,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> Result<String, AppError> {
    let ext = extension_of(file_name)
        .ok_or_else(|| AppError::bad_request("Invalid image type. Allowed: JPG, PNG, WEBP, GIF"))?;

    if !ALLOWED_MIME.contains(&content_type) || !ALLOWED_EXT.contains(&ext.as_str()) {
        return Err(AppError::bad_request(
            "Invalid image type. Allowed: JPG, PNG, WEBP, GIF",
        ));
    }

    if data.len() > config.max_bytes {
        return Err(AppError::bad_request(format!(
            "Image too large. Maximum size: {} bytes",
            config.max_bytes
        )));
    }

    fs::create_dir_all(&config.dir).await?;

    let file_name = format!("{}_{}_{}.{}", prefix, user_id, Utc::now().timestamp_millis(), ext);
    fs::write(config.dir.join(&file_name), data).await?;

    Ok(format!("/uploads/{}", file_name))
}

/// Parse a self-service profile update body.
///
/// Accepts either `application/json` or `multipart/form-data`. Multipart text
/// fields are collected into a JSON object (values that parse as JSON keep
/// their type, everything else stays a string) and deserialized into the same
/// DTO the JSON path uses, so the field allow-list is enforced identically for
/// both content types.
pub async fn parse_profile_update<T>(
    req: Request,
    config: &UploadConfig,
    prefix: &str,
    user_id: Uuid,
) -> Result<(T, Option<String>), AppError>
where
    T: DeserializeOwned,
{
    let is_multipart = req
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if !is_multipart {
        let Json(dto) = Json::<T>::from_request(req, &())
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;
        return Ok((dto, None));
    }

    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| AppError::bad_request(format!("Invalid multipart body: {}", e)))?;

    let mut fields = Map::new();
    let mut image_path = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let file_name = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| AppError::bad_request("Image field must be a file"))?;
            let content_type = field
                .content_type()
                .map(str::to_string)
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(format!("Failed to read image: {}", e)))?;

            image_path = Some(
                save_profile_image(config, prefix, user_id, &file_name, &content_type, &data)
                    .await?,
            );
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::bad_request(format!("Failed to read field '{}': {}", name, e)))?;

        // "3" becomes a number and '["a","b"]' an array; bare text stays text.
        let value = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
        fields.insert(name, value);
    }

    let dto = serde_json::from_value(Value::Object(fields))
        .map_err(|e| AppError::bad_request(format!("Invalid form fields: {}", e)))?;

    Ok((dto, image_path))
}
