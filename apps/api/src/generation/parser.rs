//! Response Parser — recovers `Variation`s from free-form model output.
//!
//! Recovery is an ordered list of strategies (`RECOVERY_STRATEGIES`); the
//! first one yielding a JSON array wins. There is deliberately no free-text
//! fallback: unrecoverable output is a `ParseError`.
//!
//! The parser accepts arrays of any length. Count enforcement lives in the
//! generation pipeline.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::email::Variation;

const FENCE: &str = "```";
/// Characters of raw output kept on a `ParseError` for diagnostics.
const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error)]
#[error("Failed to parse AI response as JSON array of variations")]
pub struct ParseError {
    pub excerpt: String,
}

type RecoveryStrategy = fn(&str) -> Option<Vec<Value>>;

/// Parse strategies in the order they are attempted.
pub const RECOVERY_STRATEGIES: &[(&str, RecoveryStrategy)] = &[
    ("direct", parse_array),
    ("bracket scan", parse_bracketed_array),
];

pub fn parse_variations(raw: &str) -> Result<Vec<Variation>, ParseError> {
    let cleaned = strip_code_fences(raw);

    RECOVERY_STRATEGIES
        .iter()
        .find_map(|(name, strategy)| {
            let items = strategy(&cleaned)?;
            debug!("Recovered {} variation(s) via {name} parse", items.len());
            Some(items)
        })
        .map(|items| items.iter().map(coerce_variation).collect())
        .ok_or_else(|| ParseError {
            excerpt: raw.chars().take(EXCERPT_CHARS).collect(),
        })
}

/// Drops leading and trailing lines whose trimmed content opens with a code fence.
pub fn strip_code_fences(text: &str) -> String {
    let lines: Vec<&str> = text.trim().lines().collect();
    let is_fence = |line: &&&str| line.trim().starts_with(FENCE);

    let start = lines.iter().take_while(is_fence).count();
    let end = lines.len() - lines[start..].iter().rev().take_while(is_fence).count();

    lines[start..end].join("\n")
}

/// Whole text as a JSON array.
fn parse_array(text: &str) -> Option<Vec<Value>> {
    match serde_json::from_str(text.trim()).ok()? {
        Value::Array(items) => Some(items),
        _ => None,
    }
}

/// The span from the first `[` to the last `]`, inclusive, as a JSON array.
fn parse_bracketed_array(text: &str) -> Option<Vec<Value>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }
    parse_array(&text[start..=end])
}

/// Missing or non-string fields become empty strings.
fn coerce_variation(value: &Value) -> Variation {
    let field = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Variation {
        subject: field("subject"),
        body: field("body"),
    }
}
