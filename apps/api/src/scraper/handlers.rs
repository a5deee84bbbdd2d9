use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::email::ScrapeResult;
use crate::scraper::run_scrape;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: String,
}

/// POST /api/v1/scrape
///
/// Always 200 once the URL is present: scrape failures are reported in
/// `ScrapeResult::error` so the client can fall back to manual entry.
pub async fn handle_scrape(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResult>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("URL is required".to_string()));
    }

    Ok(Json(run_scrape(&state.fetcher, &request.url).await))
}
