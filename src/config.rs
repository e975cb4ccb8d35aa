use std::path::{Path, PathBuf};

use homedir::my_home;
use serde::{Deserialize, Serialize};

use crate::semantic::{self, is_supported_model};

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable overriding the base directory
pub const BASE_PATH_ENV: &str = "TINY_VECTORIZER_BASE_PATH";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config is malformed: {0}")]
    Parse(#[from] serde_yml::Error),

    #[error("Invalid config value for {field}: {message}")]
    Invalid { field: String, message: String },

    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Configuration for the embedding model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SemanticSearchConfig {
    /// Model name for embeddings (e.g., "paraphrase-multilingual-MiniLM-L12-v2")
    #[serde(default = "default_semantic_model")]
    pub model: String,

    /// Batch size handed to the model when encoding document lists
    #[serde(default)]
    pub batch_size: Option<usize>,

    /// Print a progress bar while the model downloads
    #[serde(default = "default_show_download_progress")]
    pub show_download_progress: bool,
}

impl Default for SemanticSearchConfig {
    fn default() -> Self {
        Self {
            model: default_semantic_model(),
            batch_size: None,
            show_download_progress: default_show_download_progress(),
        }
    }
}

fn default_semantic_model() -> String {
    semantic::DEFAULT_MODEL.to_string()
}

fn default_show_download_progress() -> bool {
    true
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub semantic_search: SemanticSearchConfig,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        let sem = &self.semantic_search;

        if !is_supported_model(&sem.model) {
            return Err(ConfigError::Invalid {
                field: "semantic_search.model".to_string(),
                message: format!("unknown model '{}'", sem.model),
            });
        }

        if sem.batch_size == Some(0) {
            return Err(ConfigError::Invalid {
                field: "semantic_search.batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Resolve the base directory: `TINY_VECTORIZER_BASE_PATH` or
    /// `~/.local/share/tiny-vectorizer`.
    pub fn base_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(BASE_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let home = my_home()
            .ok()
            .flatten()
            .ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".local").join("share").join("tiny-vectorizer"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&Self::base_path()?)
    }

    pub fn load_with(base_path: &Path) -> Result<Self, ConfigError> {
        std::fs::create_dir_all(base_path)?;
        let config_path = base_path.join(CONFIG_FILE_NAME);

        // create new if does not exist
        if !config_path.exists() {
            std::fs::write(&config_path, serde_yml::to_string(&Self::default())?)?;
        }

        let config_str = std::fs::read_to_string(&config_path)?;
        let mut config: Self = serde_yml::from_str(&config_str)?;

        config.base_path = base_path.to_path_buf();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            log::debug!("Upgrading {}", config_path.display());
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_str = serde_yml::to_string(&self)?;
        std::fs::write(self.base_path.join(CONFIG_FILE_NAME), config_str)?;
        Ok(())
    }

    /// Directory where downloaded models are cached.
    pub fn models_dir(&self) -> PathBuf {
        self.base_path.join("models")
    }
}
