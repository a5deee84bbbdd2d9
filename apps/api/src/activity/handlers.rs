use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::email::ActivityRecord;
use crate::state::AppState;

const UNKNOWN_ACTION: &str = "unknown";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogRequest {
    pub action: Option<String>,
    pub metadata: Option<Value>,
}

/// POST /api/v1/log
///
/// Records a client-side action. Always acknowledges; a missing action is
/// logged as `"unknown"`.
pub async fn handle_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LogRequest>,
) -> Json<Value> {
    let action = request
        .action
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_ACTION.to_string());

    let mut record = ActivityRecord::new(
        action,
        None,
        request.metadata.unwrap_or_else(|| json!({})),
    );
    record.ip_address = client_ip(&headers);
    record.user_agent = header_str(&headers, header::USER_AGENT.as_str());

    state.activity.record(record).await;

    Json(json!({ "ok": true }))
}

/// First `x-forwarded-for` hop, else `x-real-ip`.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    header_str(headers, "x-forwarded-for")
        .and_then(|list| {
            list.split(',')
                .map(str::trim)
                .find(|hop| !hop.is_empty())
                .map(str::to_string)
        })
        .or_else(|| header_str(headers, "x-real-ip"))
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
