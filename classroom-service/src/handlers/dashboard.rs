use crate::models::group_by_student;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

/// Rebuild the per-student dashboard view from the flat sheet rows.
#[tracing::instrument(skip(state))]
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let store = state.sheet_store()?;

    let records = match store.fetch_records().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "Error fetching student data");
            return Err(AppError::UpstreamFailed {
                message: "Failed to fetch student data".to_string(),
                details: e.to_string(),
            });
        }
    };

    tracing::debug!(record_count = records.len(), "Loaded sheet records");

    Ok(Json(group_by_student(records)))
}
