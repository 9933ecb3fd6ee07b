use super::{
    extract::JsonBody,
    types::{
        AnalysisRequest, ErrorResponse, HEALTHY_STATUS, HealthResponse, INTERNAL_ERROR,
        NO_TEXT_ERROR, WELCOME_MESSAGE, WelcomeResponse,
    },
};
use crate::analyzer::{AnalysisResult, Analyzer};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

pub async fn index() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTHY_STATUS.to_string(),
    })
}

pub async fn analyze(
    State(state): State<AppState>,
    body: JsonBody<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, (StatusCode, Json<ErrorResponse>)> {
    let request = match body {
        JsonBody::Parsed(request) => request,
        JsonBody::Invalid(rejection) => {
            debug!("Unusable analyze body, treating as empty: {}", rejection);
            AnalysisRequest::default()
        }
    };

    let text = match request.text.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: NO_TEXT_ERROR.to_string(),
                }),
            ));
        }
    };

    debug!("Received analyze request with {} bytes of text", text.len());

    match state.analyzer.analyze(text).await {
        Ok(result) => {
            info!("Classified text as {} ({})", result.label, result.score);
            Ok(Json(result))
        }
        Err(e) => {
            error!("Sentiment analysis failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: INTERNAL_ERROR.to_string(),
                }),
            ))
        }
    }
}
