// Activity log: audit entries emitted by the pipeline and by client actions.
// Storage is external; the default sink writes structured `tracing` events.

pub mod handlers;

use async_trait::async_trait;
use tracing::info;

use crate::models::email::ActivityRecord;

/// Destination for audit entries. Carried in `AppState` as `Arc<dyn ActivitySink>`.
///
/// Recording is fire-and-forget: a sink that fails to persist must log the
/// failure itself and never fail the request that produced the record.
#[async_trait]
pub trait ActivitySink: Send + Sync {
    async fn record(&self, record: ActivityRecord);
}

/// Emits each record as an `info` event on the `activity` target.
pub struct TracingActivitySink;

#[async_trait]
impl ActivitySink for TracingActivitySink {
    async fn record(&self, record: ActivityRecord) {
        info!(
            target: "activity",
            id = %record.id,
            action = %record.action,
            recorded_at = %record.recorded_at.to_rfc3339(),
            actor = record.actor.as_deref().unwrap_or("-"),
            ip_address = record.ip_address.as_deref().unwrap_or("-"),
            user_agent = record.user_agent.as_deref().unwrap_or("-"),
            metadata = %record.metadata,
            "activity recorded"
        );
    }
}
