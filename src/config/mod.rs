mod types;

pub use types::*;

use crate::Result;
use std::{env, fmt, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Where the running configuration came from, reported once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(String),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path),
            Self::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// An explicit `CONFIG_PATH` always wins; otherwise `config.yaml` is used
/// when present.
pub fn resolve_source(config_path: Option<String>, default_exists: bool) -> ConfigSource {
    match config_path {
        Some(path) => ConfigSource::File(path),
        None if default_exists => ConfigSource::File(DEFAULT_CONFIG_PATH.to_string()),
        None => ConfigSource::Defaults,
    }
}

pub async fn load() -> Result<(Config, ConfigSource)> {
    let source = resolve_source(
        env::var("CONFIG_PATH").ok(),
        Path::new(DEFAULT_CONFIG_PATH).exists(),
    );

    let config = match &source {
        ConfigSource::File(path) => load_from(path).await?,
        ConfigSource::Defaults => Config::default(),
    };

    Ok((config, source))
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // serde_yaml rejects an empty document
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(config_str)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty_document_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.logs.level, "info");
        assert_eq!(
            config.model.repo_id,
            "distilbert-base-uncased-finetuned-sst-2-english"
        );
        assert_eq!(config.model.revision, "main");
        assert!(config.model.local_dir.is_none());
    }

    #[test]
    fn test_parse_partial_sections() {
        let config = parse(
            r#"
server:
  port: 8081
model:
  local_dir: /models/sst2
"#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.model.local_dir.as_deref(), Some("/models/sst2"));
        assert_eq!(config.model.tokenizer_repo_id, "distilbert-base-uncased");
    }

    #[test]
    fn test_resolve_source_prefers_explicit_path() {
        assert_eq!(
            resolve_source(Some("/etc/textpilot.yaml".to_string()), true),
            ConfigSource::File("/etc/textpilot.yaml".to_string())
        );
        assert_eq!(
            resolve_source(Some("/etc/textpilot.yaml".to_string()), false),
            ConfigSource::File("/etc/textpilot.yaml".to_string())
        );
    }

    #[test]
    fn test_resolve_source_falls_back_to_default_file_then_defaults() {
        assert_eq!(
            resolve_source(None, true),
            ConfigSource::File("config.yaml".to_string())
        );
        assert_eq!(resolve_source(None, false), ConfigSource::Defaults);
        assert_eq!(ConfigSource::Defaults.to_string(), "built-in defaults");
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let result = parse("server:\n  port: not-a-port\n");
        assert!(matches!(result, Err(crate::Error::Yaml(_))));
    }
}
