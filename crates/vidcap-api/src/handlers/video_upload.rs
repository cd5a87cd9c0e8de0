use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use std::sync::Arc;
use vidcap_core::constants::messages;
use vidcap_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;

pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<&'static str, HttpAppError> {
    let fail = |error: AppError| {
        HttpAppError::new(
            error,
            messages::VIDEO_UPLOAD_FAILED,
            state.response_status_mode(),
        )
    };

    let multipart =
        multipart.map_err(|rejection| fail(AppError::MalformedRequest(rejection.body_text())))?;

    let receipt = state
        .coordinator
        .handle_upload(multipart)
        .await
        .map_err(fail)?;

    tracing::info!(
        cid = %receipt.cid,
        announce = ?receipt.announce,
        "Video upload successful"
    );
    Ok(messages::VIDEO_UPLOAD_SUCCESSFUL)
}
