mod classifier;
mod distilbert;
mod types;

pub use classifier::Classifier;
pub use distilbert::DistilBertClassifier;
pub use types::{AnalysisResult, Prediction};

use crate::{Error, Result};
use std::sync::Arc;
use tracing::debug;

pub struct Analyzer {
    classifier: Arc<dyn Classifier>,
}

impl Analyzer {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Classifies `text` on the blocking pool and rounds the confidence.
    ///
    /// Callers are expected to reject empty input before getting here.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let classifier = Arc::clone(&self.classifier);
        let text = text.to_owned();

        let prediction = tokio::task::spawn_blocking(move || classifier.classify(&text))
            .await
            .map_err(|e| Error::internal(format!("Classifier task failed: {}", e)))??;

        debug!(
            "Classifier returned {} with raw score {}",
            prediction.label, prediction.score
        );

        Ok(AnalysisResult {
            label: prediction.label,
            score: round_score(prediction.score),
        })
    }
}

/// Rounds a confidence to 4 decimal places.
///
/// Widens to f64 first so the serialized value has no f32 noise digits.
pub fn round_score(score: f32) -> f64 {
    (f64::from(score) * 10_000.0).round() / 10_000.0
}
