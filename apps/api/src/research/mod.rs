//! Deep research — scrape a company site, then ask the model for a
//! search-grounded profile of it.
//!
//! Never fails outward: scrape problems leave the scraped fields empty, and a
//! model failure is reported through `ResearchProfile::error`.

pub mod handlers;

use tracing::{info, warn};

use crate::generation::builder::fill_template;
use crate::generation::prompts::RESEARCH_PROMPT_TEMPLATE;
use crate::llm_client::{GenerateOptions, ModelGateway};
use crate::models::email::ResearchProfile;
use crate::scraper::extractor::truncate_chars;
use crate::scraper::fetcher::{normalize_url, PageFetcher};
use crate::scraper::run_scrape;

pub const RESEARCH_MAX_TOKENS: u32 = 1200;
/// Website text forwarded to the research prompt.
pub const RESEARCH_WEBSITE_CHARS: usize = 1500;
const UNKNOWN_COMPANY: &str = "Unknown";

pub async fn run_research(
    fetcher: &PageFetcher,
    gateway: &dyn ModelGateway,
    url: &str,
    company_name: Option<&str>,
) -> ResearchProfile {
    let url = normalize_url(url);
    let company_name = company_name.map(str::trim).filter(|name| !name.is_empty());

    let scraped = run_scrape(fetcher, &url).await;
    let prompt = build_research_prompt(&url, company_name, &scraped.raw_text);

    let options = GenerateOptions {
        system_prompt: None,
        max_tokens: RESEARCH_MAX_TOKENS,
        use_search: true,
    };
    let (findings, error) = match gateway.generate(&prompt, &options).await {
        Ok(findings) => (Some(findings), None),
        Err(e) => {
            warn!("Research call for {url} failed: {e}");
            (None, Some(e.to_string()))
        }
    };

    let resolved_name = [Some(scraped.company_name.as_str()), company_name]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_COMPANY)
        .to_string();

    info!(
        "Research for {url}: company={resolved_name:?}, findings={}",
        findings.is_some()
    );

    ResearchProfile {
        company_name: resolved_name,
        description: scraped.description,
        services: scraped.services,
        industry_signals: scraped.industry_signals,
        findings,
        error,
    }
}

pub fn build_research_prompt(url: &str, company_name: Option<&str>, raw_text: &str) -> String {
    let company_line = company_name
        .map(|name| format!("Company Name: {name}"))
        .unwrap_or_default();
    let website_block = if raw_text.is_empty() {
        String::new()
    } else {
        format!(
            "\nWEBSITE CONTENT:\n{}",
            truncate_chars(raw_text, RESEARCH_WEBSITE_CHARS)
        )
    };

    fill_template(
        RESEARCH_PROMPT_TEMPLATE,
        &[
            ("url", url),
            ("company_line", company_line.as_str()),
            ("website_block", website_block.as_str()),
        ],
    )
}
