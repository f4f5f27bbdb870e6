//! Configuration file for the CLI.

use crate::error::{CliError, Result};
use proprel_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Corpus used when `--corpus` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_path: Option<PathBuf>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Scoring weights and suggestion policy
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tables and messages
    Text,
    /// JSON response envelope
    Json,
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: default_true(),
            format: default_format(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_toml(&fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config
            .engine
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Pick the corpus: explicit argument first, then the config file.
    pub fn resolve_corpus(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        explicit
            .or_else(|| self.corpus_path.clone())
            .ok_or(CliError::NoCorpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Text);
        assert!(config.corpus_path.is_none());
    }

    #[test]
    fn test_parse_config() {
        let config = Config::from_toml(
            r#"
            corpus_path = "corpus"

            [settings]
            color = false
            format = "json"

            [engine]
            suggest_improvements = false
            "#,
        )
        .unwrap();

        assert_eq!(config.corpus_path, Some(PathBuf::from("corpus")));
        assert!(!config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(!config.engine.suggest_improvements);
        assert_eq!(config.engine.incompatible_penalty, 1.0);
    }

    #[test]
    fn test_invalid_engine_weights() {
        let result = Config::from_toml("[engine]\ndefault_confidence = 3.0\n");
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_resolve_corpus() {
        let config = Config {
            corpus_path: Some(PathBuf::from("from-config")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_corpus(Some(PathBuf::from("explicit"))).unwrap(),
            PathBuf::from("explicit")
        );
        assert_eq!(config.resolve_corpus(None).unwrap(), PathBuf::from("from-config"));
        assert!(matches!(
            Config::default().resolve_corpus(None),
            Err(CliError::NoCorpus)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("proprel.toml");
        fs::write(&path, "[settings]\nformat = \"json\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
