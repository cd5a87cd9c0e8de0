pub mod ad_upload;
pub mod health;
pub mod video_upload;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use std::sync::Arc;
use vidcap_core::constants::messages;

use crate::error::{plain_text, status_for};
use crate::state::AppState;

/// Any method other than POST on an upload route.
pub async fn method_not_supported(State(state): State<Arc<AppState>>) -> Response {
    plain_text(
        status_for(state.response_status_mode(), StatusCode::METHOD_NOT_ALLOWED),
        messages::ONLY_POST_SUPPORTED,
    )
}
