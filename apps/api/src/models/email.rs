use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Business signals scraped from a company website.
///
/// Content fields are always present (empty when unknown). When `error` is set,
/// every content field is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub company_name: String,
    pub description: String,
    pub services: String,
    pub industry_signals: String,
    pub raw_text: String,
    pub error: Option<String>,
}

impl ScrapeResult {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Caller-supplied subset of a `ScrapeResult`, usually edited by the user
/// between the scrape and generate steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapedContext {
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub services: Option<String>,
    pub industry_signals: Option<String>,
    pub raw_text: Option<String>,
}

impl ScrapedContext {
    /// True when no field carries any text.
    pub fn is_empty(&self) -> bool {
        [
            &self.company_name,
            &self.description,
            &self.services,
            &self.industry_signals,
            &self.raw_text,
        ]
        .iter()
        .all(|field| field.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

/// Everything the prompt builder needs for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptContext {
    pub scraped_context: Option<ScrapedContext>,
    pub recipient_name: String,
    pub recipient_title: String,
    pub company_name: String,
    pub sender_name: String,
    pub tone: String,
    pub industry: String,
    /// The sender's firm, named in the positioning step of every email.
    pub sender_company: String,
}

/// One candidate email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub subject: String,
    pub body: String,
}

/// Number of variations a generation produces.
pub const VARIATION_COUNT: usize = 3;

/// Rhetorical lead assigned to each variation slot. Index order is fixed:
/// clients label variations by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationLead {
    CompanyObservation,
    IndustryTrend,
    ProvocativeQuestion,
}

impl VariationLead {
    pub const ALL: [VariationLead; VARIATION_COUNT] = [
        VariationLead::CompanyObservation,
        VariationLead::IndustryTrend,
        VariationLead::ProvocativeQuestion,
    ];

    pub fn for_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            VariationLead::CompanyObservation => "Option A — Company Focus",
            VariationLead::IndustryTrend => "Option B — Industry Trend",
            VariationLead::ProvocativeQuestion => "Option C — Provocative Question",
        }
    }

    /// Instruction given to the model for this slot.
    pub fn instruction(self) -> &'static str {
        match self {
            VariationLead::CompanyObservation => {
                "Open with a specific observation about their company"
            }
            VariationLead::IndustryTrend => "Open with an industry trend or a competitor insight",
            VariationLead::ProvocativeQuestion => {
                "Open with a question or a provocative statistic about their market"
            }
        }
    }
}

/// Output of a successful generation. Persisting it is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub id: Uuid,
    pub variations: Vec<Variation>,
    /// Display label of each variation's lead, index-aligned with `variations`.
    pub labels: Vec<String>,
    pub scraped_context: Option<ScrapedContext>,
}

/// Audit entry emitted alongside pipeline results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: Uuid,
    pub action: String,
    pub recorded_at: DateTime<Utc>,
    pub actor: Option<String>,
    pub metadata: Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ActivityRecord {
    pub fn new(action: impl Into<String>, actor: Option<String>, metadata: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: action.into(),
            recorded_at: Utc::now(),
            actor,
            metadata,
            ip_address: None,
            user_agent: None,
        }
    }
}

/// Company profile produced by the search-grounded research step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchProfile {
    pub company_name: String,
    pub description: String,
    pub services: String,
    pub industry_signals: String,
    pub findings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
