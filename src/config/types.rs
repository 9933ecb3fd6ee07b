use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Where the sentiment model is loaded from.
///
/// With `local_dir` unset the files are fetched from the Hugging Face Hub
/// (and cached there); otherwise `config.json`, `model.safetensors` and
/// `tokenizer.json` must all sit in that directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_repo_id")]
    pub repo_id: String,
    #[serde(default = "default_revision")]
    pub revision: String,
    #[serde(default = "default_tokenizer_repo_id")]
    pub tokenizer_repo_id: String,
    #[serde(default)]
    pub local_dir: Option<String>,
}

impl ModelConfig {
    /// Applies a `MODEL_DIR`-style override on top of the configured source.
    pub fn with_local_dir_override(mut self, local_dir: Option<String>) -> Self {
        if let Some(dir) = local_dir.filter(|dir| !dir.is_empty()) {
            self.local_dir = Some(dir);
        }
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            repo_id: default_repo_id(),
            revision: default_revision(),
            tokenizer_repo_id: default_tokenizer_repo_id(),
            local_dir: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_repo_id() -> String {
    "distilbert-base-uncased-finetuned-sst-2-english".to_string()
}

fn default_revision() -> String {
    "main".to_string()
}

// The fine-tuned SST-2 repo only ships vocab.txt; the base model carries the
// same uncased vocabulary as a tokenizer.json.
fn default_tokenizer_repo_id() -> String {
    "distilbert-base-uncased".to_string()
}
