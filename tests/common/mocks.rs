use textpilot::{
    Error, Result,
    analyzer::{Classifier, Prediction},
};
use std::sync::Mutex;

/// Mock classifier that labels text by keyword and records every input.
///
/// Text containing "hate" or "terrible" is NEGATIVE, everything else is
/// POSITIVE with the configured raw score.
#[derive(Debug)]
pub struct MockClassifier {
    pub score: f32,
    pub calls: Mutex<Vec<String>>,
    pub error: Option<String>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            score: 0.998_765_4,
            calls: Mutex::new(Vec::new()),
            error: None,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Classifier for MockClassifier {
    fn classify(&self, text: &str) -> Result<Prediction> {
        self.calls.lock().unwrap().push(text.to_string());

        if let Some(ref error) = self.error {
            return Err(Error::model(error.clone()));
        }

        let lowered = text.to_lowercase();
        let label = if lowered.contains("hate") || lowered.contains("terrible") {
            "NEGATIVE"
        } else {
            "POSITIVE"
        };

        Ok(Prediction {
            label: label.to_string(),
            score: self.score,
        })
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}
