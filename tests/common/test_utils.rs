use super::mocks::MockClassifier;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use textpilot::{
    Result,
    analyzer::Analyzer,
    server::{self, handlers::AppState},
};
use tokio::fs;

/// Build the application router around a mock classifier
pub fn create_test_app(classifier: Arc<MockClassifier>) -> Router {
    let app_state = AppState {
        analyzer: Arc::new(Analyzer::new(classifier)),
    };
    server::router(app_state)
}

/// POST a raw body to /analyze with the given content type
pub fn analyze_request(body: impl Into<Body>, content_type: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/analyze");
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(body.into()).unwrap()
}

/// POST a JSON value to /analyze
pub fn analyze_json_request(body: &Value) -> Request<Body> {
    analyze_request(body.to_string(), Some("application/json"))
}

/// Read a response body as JSON
pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Write a config YAML file into a temporary directory
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  logs:
    level: "debug"

model:
  repo_id: "distilbert-base-uncased-finetuned-sst-2-english"
  revision: "v1.0"
  tokenizer_repo_id: "distilbert-base-uncased"
"#;

/// Sample configuration pointing at a local model directory
pub const SAMPLE_CONFIG_WITH_LOCAL_MODEL: &str = r#"
server:
  port: 9000

model:
  local_dir: "/models/sst2"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: "not-a-number"
"#;
