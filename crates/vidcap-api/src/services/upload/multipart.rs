//! Multipart form reading shared by the upload endpoints.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use futures::TryStreamExt;
use std::io;
use std::path::Path;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;
use vidcap_core::constants::fields;
use vidcap_core::models::AdvertisementRecord;
use vidcap_core::AppError;

/// Map a multipart parse failure onto the request-shape errors.
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::MalformedRequest(err.body_text())
    }
}

/// Reclassify a staging read failure that was caused by the multipart stream.
pub fn stream_read_error(err: io::Error) -> AppError {
    match err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<MultipartError>())
    {
        Some(multipart) if multipart.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            AppError::PayloadTooLarge(multipart.body_text())
        }
        _ => AppError::MalformedRequest(format!("Failed to read upload stream: {}", err)),
    }
}

/// Expose a file part as an `AsyncRead`.
pub fn field_reader<'a>(field: Field<'a>) -> impl AsyncRead + Send + 'a {
    StreamReader::new(field.map_err(io::Error::other))
}

/// Extension of the client-supplied file name, if any.
pub fn client_extension(field: &Field<'_>) -> Option<String> {
    field
        .file_name()
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_string)
}

/// Read the advertisement form. Fields that are absent stay empty; unknown parts are skipped.
pub async fn read_ad_form(mut multipart: Multipart) -> Result<AdvertisementRecord, AppError> {
    let mut name = None;
    let mut image_link = None;
    let mut redirect_url = None;
    let mut object = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(str::to_owned);
        let slot = match field_name.as_deref() {
            Some(fields::AD_NAME) => &mut name,
            Some(fields::AD_IMAGE_LINK) => &mut image_link,
            Some(fields::AD_REDIRECT_URL) => &mut redirect_url,
            Some(fields::AD_OBJECT) => &mut object,
            other => {
                tracing::debug!(field = ?other, "Skipping unknown advertisement field");
                continue;
            }
        };
        let value = field.text().await.map_err(multipart_error)?;
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    Ok(AdvertisementRecord {
        name: name.unwrap_or_default(),
        image_link: image_link.unwrap_or_default(),
        object: object.unwrap_or_default(),
        redirect_url: redirect_url.unwrap_or_default(),
    })
}
