use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MIN_TEXT_LENGTH: usize = 50;
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1_000_000;
pub const DEFAULT_MAX_KEYWORDS: usize = 15;
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub rubric_path: Option<PathBuf>,
    pub lexicon_dir: Option<PathBuf>,
    pub min_text_length: usize,
    pub max_text_length: usize,
    pub max_keywords: usize,
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rubric_path: None,
            lexicon_dir: None,
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let rubric_path = env::var("PITCHGRADE_RUBRIC_PATH").ok().map(PathBuf::from);

        let lexicon_dir = env::var("PITCHGRADE_LEXICON_DIR").ok().map(PathBuf::from);

        let min_text_length = env::var("PITCHGRADE_MIN_TEXT_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MIN_TEXT_LENGTH);

        let max_text_length = env::var("PITCHGRADE_MAX_TEXT_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TEXT_LENGTH);

        let max_keywords = env::var("PITCHGRADE_MAX_KEYWORDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_KEYWORDS);

        let cache_capacity = env::var("PITCHGRADE_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_CAPACITY);

        let config = Self {
            rubric_path,
            lexicon_dir,
            min_text_length,
            max_text_length,
            max_keywords,
            cache_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_text_length == 0 {
            return Err(Error::Config(
                "minimum text length must be greater than zero".to_string(),
            ));
        }
        if self.max_text_length <= self.min_text_length {
            return Err(Error::Config(format!(
                "maximum text length ({}) must exceed minimum ({})",
                self.max_text_length, self.min_text_length
            )));
        }
        if self.max_keywords == 0 {
            return Err(Error::Config(
                "keyword limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// The subset of [`Config`] that affects analysis output.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub max_keywords: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }
}

impl From<&Config> for AnalyzerConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_keywords: config.max_keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_text_length, 50);
        assert_eq!(config.max_keywords, 15);
    }

    #[test]
    fn test_rejects_inverted_length_bounds() {
        let config = Config {
            min_text_length: 500,
            max_text_length: 100,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_zero_keyword_limit() {
        let config = Config {
            max_keywords: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_analyzer_config_from_config() {
        let config = Config {
            max_keywords: 7,
            ..Config::default()
        };
        assert_eq!(AnalyzerConfig::from(&config).max_keywords, 7);
    }
}
