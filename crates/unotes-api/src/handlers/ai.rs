//! Tutor HTTP handlers.
//!
//! Both routes feed the same orchestrator. `/api/chat` is kept for older
//! clients that post `{question, notes}`; normalization folds that shape
//! into a CHAT request.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use unotes_core::{InboundRequest, ResponseEnvelope};

use crate::{ApiError, AppState};

/// Run one tutor request.
///
/// # Returns
/// - 200 OK with `{response, mode, timestamp}`
/// - 400 Bad Request if the body is not valid JSON, the mode cannot be
///   determined, or a field the resolved mode needs is missing
/// - 500 Internal Server Error if the model call fails
pub async fn ask_tutor(
    State(state): State<AppState>,
    payload: Result<Json<InboundRequest>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let envelope = state.tutor.handle(request).await?;
    Ok(Json(envelope))
}
