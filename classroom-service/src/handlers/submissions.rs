use crate::startup::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;
use service_core::error::AppError;

/// Forward a student submission to the sheet store untouched and relay the
/// store's reply. No schema is enforced: the sheet appends whichever columns
/// it knows about, and clients own the payload shape.
///
/// Store failures of any kind collapse to a 500 with the cause under
/// `details`; the upstream status is not preserved on this route.
#[tracing::instrument(skip(state, payload))]
pub async fn submit_submission(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let store = state.sheet_store()?;
    let Json(submission) =
        payload.map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))?;

    match store.append(&submission).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            tracing::error!(error = %e, "Error processing submission");
            Err(AppError::UpstreamFailed {
                message: "Failed to process submission".to_string(),
                details: e.to_string(),
            })
        }
    }
}

/// Non-POST gets a bare-text 405 here, unlike the JSON body on the analyze
/// route.
pub async fn submit_method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
