//! Prompt Builder — turns a `PromptContext` into the system and user prompts.
//!
//! Pure and deterministic: the same context always yields byte-identical prompts.

use crate::generation::prompts::{
    EMAIL_SYSTEM_TEMPLATE, EMAIL_USER_TEMPLATE, MISSING_FIELD, SCRAPED_CONTEXT_TEMPLATE,
};
use crate::generation::tone::Tone;
use crate::models::email::{PromptContext, ScrapedContext, VariationLead};

/// The two prompts sent to the model for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailPrompt {
    pub system_prompt: String,
    pub user_prompt: String,
}

pub fn build_email_prompt(ctx: &PromptContext) -> EmailPrompt {
    let tone = Tone::resolve(&ctx.tone);

    let system_prompt = fill_template(
        EMAIL_SYSTEM_TEMPLATE,
        &[
            ("sender_company", ctx.sender_company.as_str()),
            ("tone", tone.label()),
            ("tone_guidance", tone.guidance()),
        ],
    );

    let scraped_block = ctx
        .scraped_context
        .as_ref()
        .filter(|scraped| !scraped.is_empty())
        .map(|scraped| render_scraped_block(scraped, &ctx.company_name))
        .unwrap_or_default();

    let strategy = render_strategy();

    let user_prompt = fill_template(
        EMAIL_USER_TEMPLATE,
        &[
            ("recipient_name", ctx.recipient_name.as_str()),
            ("recipient_title", ctx.recipient_title.as_str()),
            ("company_name", ctx.company_name.as_str()),
            ("industry", ctx.industry.as_str()),
            ("sender_name", ctx.sender_name.as_str()),
            ("sender_company", ctx.sender_company.as_str()),
            ("scraped_block", scraped_block.as_str()),
            ("strategy", strategy.as_str()),
        ],
    );

    EmailPrompt {
        system_prompt,
        user_prompt,
    }
}

fn render_scraped_block(scraped: &ScrapedContext, company_name: &str) -> String {
    let company = field_or(&scraped.company_name, company_name.trim());
    let company = if company.is_empty() { MISSING_FIELD } else { company };
    fill_template(
        SCRAPED_CONTEXT_TEMPLATE,
        &[
            ("company", company),
            ("description", field_or(&scraped.description, MISSING_FIELD)),
            ("services", field_or(&scraped.services, MISSING_FIELD)),
            (
                "industry_signals",
                field_or(&scraped.industry_signals, MISSING_FIELD),
            ),
        ],
    )
}

/// One line per variation slot, in `VariationLead::ALL` order.
fn render_strategy() -> String {
    VariationLead::ALL
        .iter()
        .enumerate()
        .map(|(i, lead)| format!("- Variation {}: {}", i + 1, lead.instruction()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
}

/// Substitutes `{key}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so user text containing `{...}`
/// cannot pull in other fields. Unknown `{...}` sequences are kept verbatim.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let substitution = values.iter().find_map(|(key, value)| {
            tail.strip_prefix('{')?
                .strip_prefix(key)?
                .strip_prefix('}')
                .map(|remaining| (*value, remaining))
        });

        match substitution {
            Some((value, remaining)) => {
                out.push_str(value);
                rest = remaining;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
