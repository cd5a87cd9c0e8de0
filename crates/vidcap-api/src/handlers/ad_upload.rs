use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use std::sync::Arc;
use vidcap_core::constants::messages;
use vidcap_core::AppError;

use crate::error::HttpAppError;
use crate::services::upload::multipart::read_ad_form;
use crate::state::AppState;

/// Records an advertisement. No file handling: a single insert.
pub async fn upload_ad(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<&'static str, HttpAppError> {
    let mode = state.response_status_mode();
    let unparsable = |error: AppError| {
        HttpAppError::new(error, messages::UNABLE_TO_PARSE_REQUEST, mode)
    };

    let multipart = multipart
        .map_err(|rejection| unparsable(AppError::MalformedRequest(rejection.body_text())))?;
    let ad = read_ad_form(multipart).await.map_err(unparsable)?;

    state
        .database
        .insert_ad(&ad)
        .await
        .map_err(|e| HttpAppError::new(e, messages::AD_UPLOAD_FAILED, mode))?;

    tracing::info!(ad_name = %ad.name, "Ad upload successful");
    Ok(messages::AD_UPLOAD_SUCCESSFUL)
}
