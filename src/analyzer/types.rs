use serde::{Deserialize, Serialize};

/// Raw classifier output: the winning label and its softmax probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

/// What `/analyze` returns. `score` is already rounded to 4 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub label: String,
    pub score: f64,
}
