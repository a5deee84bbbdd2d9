use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::email::ResearchProfile;
use crate::research::run_research;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub url: String,
    pub company_name: Option<String>,
}

/// POST /api/v1/research
pub async fn handle_research(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<ResearchProfile>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("URL is required".to_string()));
    }

    let profile = run_research(
        &state.fetcher,
        state.llm.as_ref(),
        &request.url,
        request.company_name.as_deref(),
    )
    .await;

    Ok(Json(profile))
}
