use serde::{Deserialize, Serialize};

use crate::chunking::DEFAULT_TARGET_WORDS;
use crate::encoding::{DEFAULT_N_MAX, MAX_LEVELS};
use crate::selection::ranking::{DEFAULT_DIGEST_WEIGHT, DEFAULT_KEYWORD_WEIGHT};
use crate::types::errors::ValidationError;

// Serializable, comparable, explicit defaults.
// Missing fields in a JSON document fall back to `v1()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub target_words: usize,
    pub min_text_chars: usize,
    pub max_name_chars: usize,

    pub default_n_max: usize,
    pub min_n_max: usize,
    pub max_n_max: usize,

    pub default_top_k: usize,
    pub max_top_k: usize,
    pub default_max_results: usize,
    pub max_max_results: usize,

    pub preview_chars: usize,

    pub keyword_weight: f32,
    pub digest_weight: f32,
}

impl EngineConfig {
    pub fn v1() -> Self {
        Self {
            target_words: DEFAULT_TARGET_WORDS,
            min_text_chars: 100,
            max_name_chars: 100,
            default_n_max: DEFAULT_N_MAX,
            min_n_max: 5,
            max_n_max: 20,
            default_top_k: 8,
            max_top_k: 20,
            default_max_results: 10,
            max_max_results: 50,
            preview_chars: 200,
            keyword_weight: DEFAULT_KEYWORD_WEIGHT,
            digest_weight: DEFAULT_DIGEST_WEIGHT,
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |msg: &str| Err(ValidationError::InvalidConfig(msg.to_string()));

        if self.target_words == 0 {
            return invalid("target_words must be at least 1");
        }
        if self.max_name_chars == 0 {
            return invalid("max_name_chars must be at least 1");
        }
        if self.min_n_max < 1 || self.min_n_max > self.max_n_max || self.max_n_max > MAX_LEVELS {
            return invalid("n_max range must satisfy 1 <= min_n_max <= max_n_max <= 1024");
        }
        if !(self.min_n_max..=self.max_n_max).contains(&self.default_n_max) {
            return invalid("default_n_max must lie inside the n_max range");
        }
        if self.default_top_k < 1 || self.default_top_k > self.max_top_k {
            return invalid("default_top_k must lie inside 1..=max_top_k");
        }
        if self.default_max_results < 1 || self.default_max_results > self.max_max_results {
            return invalid("default_max_results must lie inside 1..=max_max_results");
        }
        if self.keyword_weight < 0.0
            || self.digest_weight < 0.0
            || (self.keyword_weight + self.digest_weight - 1.0).abs() > 1e-6
        {
            return invalid("keyword_weight and digest_weight must be non-negative and sum to 1.0");
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::v1()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
