//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::generation::generator::run_generation;
use crate::generation::tone::Tone;
use crate::models::email::{GenerationResult, PromptContext, ScrapedContext};
use crate::state::AppState;

pub const DEFAULT_INDUSTRY: &str = "Technology";
pub const DEFAULT_SENDER_NAME: &str = "Team";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub recipient_name: String,
    pub recipient_title: String,
    pub company_name: Option<String>,
    pub company_url: Option<String>,
    pub industry: Option<String>,
    pub tone: Option<String>,
    pub scraped_context: Option<ScrapedContext>,
    /// Display name of the authenticated sender, resolved by the caller.
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
}

impl GenerateRequest {
    /// Applies request defaults. `sender_company` comes from configuration.
    pub fn to_prompt_context(&self, sender_company: &str) -> PromptContext {
        let sender_name = non_blank(&self.sender_name)
            .or_else(|| non_blank(&self.sender_email))
            .unwrap_or(DEFAULT_SENDER_NAME);

        PromptContext {
            scraped_context: self.scraped_context.clone(),
            recipient_name: self.recipient_name.trim().to_string(),
            recipient_title: self.recipient_title.trim().to_string(),
            company_name: non_blank(&self.company_name).unwrap_or_default().to_string(),
            sender_name: sender_name.to_string(),
            tone: non_blank(&self.tone)
                .unwrap_or(Tone::default().label())
                .to_string(),
            industry: non_blank(&self.industry)
                .unwrap_or(DEFAULT_INDUSTRY)
                .to_string(),
            sender_company: sender_company.to_string(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate
///
/// Builds prompts → one model call → parse 3 variations. The result is
/// returned for the caller to persist; the audit record goes to the
/// activity sink.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerationResult>, AppError> {
    if request.recipient_name.trim().is_empty() || request.recipient_title.trim().is_empty() {
        return Err(AppError::Validation(
            "Recipient name and title are required".to_string(),
        ));
    }

    let ctx = request.to_prompt_context(&state.config.sender_company);
    let outcome = run_generation(state.llm.as_ref(), &ctx).await?;

    let mut activity = outcome.activity;
    activity.actor = non_blank(&request.sender_email).map(str::to_string);
    if let (Some(url), Some(metadata)) = (
        non_blank(&request.company_url),
        activity.metadata.as_object_mut(),
    ) {
        metadata.insert("company_url".to_string(), Value::String(url.to_string()));
    }
    state.activity.record(activity).await;

    Ok(Json(outcome.result))
}
