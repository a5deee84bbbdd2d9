pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::activity::handlers::handle_log;
use crate::generation::handlers::handle_generate;
use crate::research::handlers::handle_research;
use crate::scraper::handlers::handle_scrape;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/env", get(health::env_status_handler))
        // Pipeline
        .route("/api/v1/scrape", post(handle_scrape))
        .route("/api/v1/research", post(handle_research))
        .route("/api/v1/generate", post(handle_generate))
        // Activity
        .route("/api/v1/log", post(handle_log))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::ModelGateway;
    use crate::scraper::fetcher::PageFetcher;
    use crate::testing::{RecordingSink, StubGateway};

    const THREE_VARIATIONS: &str = r#"[
        {"subject": "A", "body": "Hi Dana, a"},
        {"subject": "B", "body": "Hi Dana, b"},
        {"subject": "C", "body": "Hi Dana, c"}
    ]"#;

    fn config(api_key: Option<&str>) -> Config {
        Config {
            google_ai_api_key: api_key.map(str::to_string),
            gemini_model: "gemini-test".to_string(),
            gemini_api_base_url: "http://127.0.0.1:1".to_string(),
            sender_company: "SeederWorks".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn app(gateway: Arc<dyn ModelGateway>, sink: Arc<RecordingSink>) -> Router {
        build_router(AppState {
            fetcher: PageFetcher::new().unwrap(),
            llm: gateway,
            activity: sink,
            config: config(Some("test-key")),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(
            Arc::new(StubGateway::unconfigured()),
            Arc::new(RecordingSink::default()),
        );
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "outreach-api");
    }

    #[tokio::test]
    async fn test_env_reports_configured_credentials() {
        let app = app(
            Arc::new(StubGateway::unconfigured()),
            Arc::new(RecordingSink::default()),
        );
        let response = app
            .oneshot(Request::get("/api/v1/env").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!({"GOOGLE_AI_API_KEY": true}));
    }

    #[tokio::test]
    async fn test_generate_returns_variations_and_records_activity() {
        let sink = Arc::new(RecordingSink::default());
        let app = app(Arc::new(StubGateway::replying(THREE_VARIATIONS)), sink.clone());

        let response = app
            .oneshot(post_json(
                "/api/v1/generate",
                json!({
                    "recipient_name": "Dana Reyes",
                    "recipient_title": "VP Operations",
                    "company_name": "Acme",
                    "company_url": "acme.test",
                    "sender_email": "sam@seederworks.com",
                    "scraped_context": {"description": "Freight routing"}
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["variations"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["variations"][1]["subject"], "B");
        assert_eq!(body["labels"][2], "Option C — Provocative Question");
        assert_eq!(body["scraped_context"]["description"], "Freight routing");
        assert!(body["id"].is_string());

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, "generation");
        assert_eq!(records[0].actor.as_deref(), Some("sam@seederworks.com"));
        assert_eq!(records[0].metadata["tone"], "Consultative");
        assert_eq!(records[0].metadata["industry"], "Technology");
        assert_eq!(records[0].metadata["company_url"], "acme.test");
    }

    #[tokio::test]
    async fn test_generate_requires_recipient_name_and_title() {
        let gateway = Arc::new(StubGateway::replying(THREE_VARIATIONS));
        let app = app(gateway.clone(), Arc::new(RecordingSink::default()));

        let response = app
            .oneshot(post_json(
                "/api/v1/generate",
                json!({"recipient_name": "Dana", "recipient_title": "  "}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(gateway.calls().is_empty(), "no model call on invalid input");
    }

    #[tokio::test]
    async fn test_generate_without_credentials_is_503() {
        let sink = Arc::new(RecordingSink::default());
        let app = app(Arc::new(StubGateway::unconfigured()), sink.clone());

        let response = app
            .oneshot(post_json(
                "/api/v1/generate",
                json!({"recipient_name": "Dana", "recipient_title": "CTO"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");
        assert!(sink.records().is_empty());
    }

    #[tokio::test]
    async fn test_generate_unparseable_output_is_502() {
        let app = app(
            Arc::new(StubGateway::replying("I'd rather not.")),
            Arc::new(RecordingSink::default()),
        );

        let response = app
            .oneshot(post_json(
                "/api/v1/generate",
                json!({"recipient_name": "Dana", "recipient_title": "CTO"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["error"]["code"], "PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_scrape_and_research_require_url() {
        for uri in ["/api/v1/scrape", "/api/v1/research"] {
            let app = app(
                Arc::new(StubGateway::unconfigured()),
                Arc::new(RecordingSink::default()),
            );
            let response = app.oneshot(post_json(uri, json!({"url": ""}))).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_scrape_failure_is_reported_in_body() {
        let app = app(
            Arc::new(StubGateway::unconfigured()),
            Arc::new(RecordingSink::default()),
        );
        let response = app
            .oneshot(post_json("/api/v1/scrape", json!({"url": "http://127.0.0.1:1"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
        assert_eq!(body["company_name"], "");
    }

    #[tokio::test]
    async fn test_log_records_client_action() {
        let sink = Arc::new(RecordingSink::default());
        let app = app(Arc::new(StubGateway::unconfigured()), sink.clone());

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/log")
            .header("content-type", "application/json")
            .header("x-forwarded-for", "203.0.113.7")
            .header("user-agent", "test-agent/1.0")
            .body(Body::from(json!({"metadata": {"variation": 1}}).to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"ok": true}));

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, "unknown");
        assert_eq!(records[0].metadata, json!({"variation": 1}));
        assert_eq!(records[0].ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(records[0].user_agent.as_deref(), Some("test-agent/1.0"));
    }
}
