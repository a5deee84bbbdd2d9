//! In-process doubles for the injected collaborators in `AppState`.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::activity::ActivitySink;
use crate::llm_client::{GenerateOptions, LlmError, ModelGateway};
use crate::models::email::ActivityRecord;

/// Returns a canned reply (or `LlmError::Configuration` when it has none)
/// and remembers every call.
#[derive(Default)]
pub struct StubGateway {
    reply: Option<String>,
    calls: Mutex<Vec<(String, GenerateOptions)>>,
}

impl StubGateway {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            ..Self::default()
        }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, GenerateOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGateway for StubGateway {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), options.clone()));
        self.reply.clone().ok_or(LlmError::Configuration)
    }
}

/// Binds a loopback listener that accepts connections and never answers.
/// Returns its base URL.
pub async fn stalled_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}

#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<ActivityRecord>>,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<ActivityRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActivitySink for RecordingSink {
    async fn record(&self, record: ActivityRecord) {
        self.records.lock().unwrap().push(record);
    }
}
