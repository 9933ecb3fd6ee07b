use super::types::Prediction;
use crate::Result;

/// A loaded text classification model.
///
/// Implementations are shared read-only across requests and may block the
/// calling thread for the duration of a forward pass.
#[cfg_attr(test, mockall::automock)]
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Prediction>;
}
