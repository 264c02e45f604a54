use crate::services::providers::{AnalysisPrompt, ProviderError};
use crate::startup::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::Value;
use service_core::error::AppError;
use validator::Validate;

/// Brief-analysis request. `brief_data` is part of the client contract but
/// only the prompts travel upstream.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub brief_data: Option<Value>,
    pub system_prompt: String,
    #[validate(length(min = 1, message = "userPrompt cannot be empty"))]
    pub user_prompt: String,
}

/// Proxy one brief-analysis prompt to the text provider and relay whatever
/// it answers: a 200 body unchanged, or the upstream error status with the
/// upstream body under `details`.
#[tracing::instrument(skip(state, payload))]
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) =
        payload.map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))?;
    request.validate()?;

    tracing::debug!(
        prompt_len = request.user_prompt.len(),
        has_brief = request.brief_data.is_some(),
        "Received analysis request"
    );

    let prompt = AnalysisPrompt {
        system_prompt: request.system_prompt,
        user_prompt: request.user_prompt,
    };

    match state.text_provider.analyze(&prompt).await {
        Ok(body) => Ok(Json(body)),
        Err(ProviderError::Api { status, body }) => Err(AppError::UpstreamStatus {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            details: body,
        }),
        Err(e) => {
            tracing::error!(error = %e, "Analysis request failed");
            Err(AppError::InternalError(anyhow::anyhow!(e)))
        }
    }
}

/// The CORS layer answers true preflights itself; plain OPTIONS probes land
/// here and get the same 200.
pub async fn cors_preflight() -> impl IntoResponse {
    (StatusCode::OK, "CORS preflight successful")
}

/// JSON 405 used by the analyze and dashboard routes.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
