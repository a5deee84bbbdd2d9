use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_SENDER_COMPANY: &str = "SeederWorks";

/// Application configuration loaded from environment variables.
///
/// Nothing is strictly required at startup: a missing `GOOGLE_AI_API_KEY`
/// only surfaces as a configuration error when a model call is attempted.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_ai_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base_url: String,
    /// The sender's firm, named in every generated email.
    pub sender_company: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_ai_api_key: optional_env("GOOGLE_AI_API_KEY"),
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_api_base_url: env_or("GEMINI_API_BASE_URL", DEFAULT_API_BASE_URL),
            sender_company: env_or("SENDER_COMPANY", DEFAULT_SENDER_COMPANY),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn has_model_credentials(&self) -> bool {
        self.google_ai_api_key.is_some()
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
