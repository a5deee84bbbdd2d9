//! Email Generation — orchestrates one generation request.
//!
//! Flow: build prompts → model call → parse variations → enforce count →
//!       return result + audit record.
//!
//! Stateless: nothing is cached or stored here. The caller persists the
//! `GenerationResult` and forwards the `ActivityRecord` to its sink.

use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::generation::builder::build_email_prompt;
use crate::generation::parser::{parse_variations, ParseError};
use crate::llm_client::{GenerateOptions, LlmError, ModelGateway};
use crate::models::email::{
    ActivityRecord, GenerationResult, PromptContext, Variation, VariationLead, VARIATION_COUNT,
};

/// Output budget for three variations of up to 150 words each.
pub const GENERATION_MAX_TOKENS: u32 = 3000;
pub const GENERATION_ACTION: &str = "generation";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Expected {expected} email variations, model returned {found}")]
    VariationCount { expected: usize, found: usize },
}

/// A generation result plus the audit entry describing it.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub result: GenerationResult,
    pub activity: ActivityRecord,
}

/// Runs one generation. Never retries; a failure is returned to the caller.
pub async fn run_generation(
    gateway: &dyn ModelGateway,
    ctx: &PromptContext,
) -> Result<GenerationOutcome, GenerationError> {
    let prompt = build_email_prompt(ctx);
    let options = GenerateOptions {
        system_prompt: Some(prompt.system_prompt),
        max_tokens: GENERATION_MAX_TOKENS,
        use_search: false,
    };

    info!(
        "Generating emails for {} at {:?} (tone={}, industry={})",
        ctx.recipient_name, ctx.company_name, ctx.tone, ctx.industry
    );
    let raw = gateway.generate(&prompt.user_prompt, &options).await?;

    let variations = parse_variations(&raw).map_err(|e| {
        warn!("Unparseable model output: {:?}", e.excerpt);
        e
    })?;
    let variations = enforce_variation_count(variations)?;

    let labels = (0..variations.len())
        .filter_map(VariationLead::for_index)
        .map(|lead| lead.label().to_string())
        .collect();
    let result = GenerationResult {
        id: Uuid::new_v4(),
        variations,
        labels,
        scraped_context: ctx.scraped_context.clone(),
    };
    let activity = ActivityRecord::new(
        GENERATION_ACTION,
        None,
        json!({
            "recipient_name": ctx.recipient_name,
            "company_name": ctx.company_name,
            "industry": ctx.industry,
            "tone": ctx.tone,
            "subjects": result.variations.iter().map(|v| &v.subject).collect::<Vec<_>>(),
        }),
    );

    info!("Generation {} produced {} variations", result.id, result.variations.len());

    Ok(GenerationOutcome { result, activity })
}

/// Fewer than `VARIATION_COUNT` is an error; extras are dropped.
fn enforce_variation_count(
    mut variations: Vec<Variation>,
) -> Result<Vec<Variation>, GenerationError> {
    let found = variations.len();
    if found < VARIATION_COUNT {
        return Err(GenerationError::VariationCount {
            expected: VARIATION_COUNT,
            found,
        });
    }
    if found > VARIATION_COUNT {
        warn!("Model returned {found} variations; keeping the first {VARIATION_COUNT}");
        variations.truncate(VARIATION_COUNT);
    }
    Ok(variations)
}
