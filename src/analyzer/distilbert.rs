use super::{Classifier, Prediction};
use crate::{Error, Result, config::ModelConfig};
use candle_core::{D, DType, Device, IndexOp, Module, Tensor};
use candle_nn::{Linear, VarBuilder, linear, ops::softmax};
use candle_transformers::models::distilbert::{Config as DistilBertConfig, DistilBertModel};
use hf_hub::{Repo, RepoType, api::sync::Api};
use serde::Deserialize;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tokenizers::Tokenizer;
use tracing::{debug, info};

/// DistilBERT encoder with the sequence classification head
/// (`pre_classifier` -> ReLU -> `classifier`) applied to the `[CLS]` token.
pub struct DistilBertClassifier {
    model: DistilBertModel,
    pre_classifier: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    labels: Vec<String>,
    device: Device,
}

// Fields the candle config keeps private, plus the label table.
#[derive(Debug, Deserialize)]
struct ClassificationHeadConfig {
    dim: usize,
    #[serde(default)]
    id2label: HashMap<String, String>,
}

struct ModelFiles {
    config: PathBuf,
    weights: PathBuf,
    tokenizer: PathBuf,
}

impl ModelFiles {
    fn from_dir(dir: &Path) -> Result<Self> {
        let files = Self {
            config: dir.join("config.json"),
            weights: dir.join("model.safetensors"),
            tokenizer: dir.join("tokenizer.json"),
        };

        for path in [&files.config, &files.weights, &files.tokenizer] {
            if !path.is_file() {
                return Err(Error::config(format!(
                    "Model file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(files)
    }

    fn from_hub(config: &ModelConfig) -> Result<Self> {
        let api = Api::new()?;
        let repo = api.repo(Repo::with_revision(
            config.repo_id.clone(),
            RepoType::Model,
            config.revision.clone(),
        ));

        let model_config = repo.get("config.json")?;
        let weights = repo.get("model.safetensors")?;
        let tokenizer = api
            .model(config.tokenizer_repo_id.clone())
            .get("tokenizer.json")?;

        Ok(Self {
            config: model_config,
            weights,
            tokenizer,
        })
    }
}

impl DistilBertClassifier {
    /// Loads the model eagerly. Blocks on file IO and, for hub models, on
    /// the download.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let files = match &config.local_dir {
            Some(dir) => {
                info!("Loading sentiment model from local directory: {}", dir);
                ModelFiles::from_dir(Path::new(dir))?
            }
            None => {
                info!(
                    "Loading sentiment model {}@{} from the Hugging Face Hub",
                    config.repo_id, config.revision
                );
                ModelFiles::from_hub(config)?
            }
        };

        Self::from_files(&files, Device::Cpu)
    }

    fn from_files(files: &ModelFiles, device: Device) -> Result<Self> {
        let config_str = std::fs::read_to_string(&files.config)?;
        let model_config: DistilBertConfig = serde_json::from_str(&config_str)?;
        let head: ClassificationHeadConfig = serde_json::from_str(&config_str)?;
        let labels = labels_by_id(&head.id2label)?;

        let tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| Error::tokenization(format!("Failed to load tokenizer: {}", e)))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&files.weights], DType::F32, &device)?
        };

        let model = DistilBertModel::load(vb.pp("distilbert"), &model_config)?;
        let pre_classifier = linear(head.dim, head.dim, vb.pp("pre_classifier"))?;
        let classifier = linear(head.dim, labels.len(), vb.pp("classifier"))?;

        debug!("Classifier labels: {:?}", labels);

        Ok(Self {
            model,
            pre_classifier,
            classifier,
            tokenizer,
            labels,
            device,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn probabilities(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::tokenization(e.to_string()))?;
        let ids = encoding.get_ids();
        let seq_len = ids.len();

        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        // Single unpadded sequence: nothing is masked out.
        let mask = Tensor::zeros((seq_len, seq_len), DType::U8, &self.device)?;

        let hidden = self.model.forward(&input_ids, &mask)?;
        let cls = hidden.i((.., 0))?;
        let pooled = self.pre_classifier.forward(&cls)?.relu()?;
        let logits = self.classifier.forward(&pooled)?;

        let probs = softmax(&logits, D::Minus1)?.squeeze(0)?.to_vec1::<f32>()?;
        Ok(probs)
    }
}

impl Classifier for DistilBertClassifier {
    fn classify(&self, text: &str) -> Result<Prediction> {
        let probs = self.probabilities(text)?;

        let (pred_id, score) = probs
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| Error::model("Classifier produced no logits"))?;

        let label = self
            .labels
            .get(pred_id)
            .ok_or_else(|| Error::model(format!("Predicted id {} not in id2label", pred_id)))?
            .clone();

        Ok(Prediction { label, score })
    }
}

/// Turns the `id2label` map from `config.json` into a dense id-indexed table.
fn labels_by_id(id2label: &HashMap<String, String>) -> Result<Vec<String>> {
    if id2label.is_empty() {
        return Err(Error::model("config.json has no id2label mapping"));
    }

    let mut labels = vec![None; id2label.len()];
    for (id, label) in id2label {
        let index: usize = id
            .parse()
            .map_err(|_| Error::model(format!("Invalid label id in id2label: {}", id)))?;
        let slot = labels
            .get_mut(index)
            .ok_or_else(|| Error::model(format!("Label id {} out of range", index)))?;
        *slot = Some(label.clone());
    }

    labels
        .into_iter()
        .enumerate()
        .map(|(id, label)| label.ok_or_else(|| Error::model(format!("Missing label for id {}", id))))
        .collect()
}
