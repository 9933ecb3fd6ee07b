use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const WELCOME_MESSAGE: &str = "Welcome to TextPilot API";
pub const HEALTHY_STATUS: &str = "healthy";
pub const NO_TEXT_ERROR: &str = "No text provided";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Body of `POST /analyze`. Only JSON objects are accepted; a `text` that
/// is absent, `null` or not a string counts as missing.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct AnalysisRequest {
    pub text: Option<String>,
}

impl From<Map<String, Value>> for AnalysisRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        let text = match body.remove("text") {
            Some(Value::String(text)) => Some(text),
            _ => None,
        };
        Self { text }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
