use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const EMBEDDED_RUBRIC: &str = include_str!("../../data/rubric.json");

/// One rubric entry used to detect a standard pitch-deck topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCriterion {
    pub name: String,
    pub keywords: Vec<String>,
    pub tip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricCategory {
    Revenue,
    Users,
    Growth,
    Funding,
}

impl MetricCategory {
    pub const ALL: [MetricCategory; 4] = [
        MetricCategory::Revenue,
        MetricCategory::Users,
        MetricCategory::Growth,
        MetricCategory::Funding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricCategory::Revenue => "revenue",
            MetricCategory::Users => "users",
            MetricCategory::Growth => "growth",
            MetricCategory::Funding => "funding",
        }
    }
}

impl fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationMessages {
    pub section_coverage: String,
    pub financial_metrics: String,
    pub readability: String,
    pub sentiment: String,
}

/// The full scoring configuration: every domain literal the analyzers use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub sections: Vec<SectionCriterion>,
    pub financial_patterns: BTreeMap<MetricCategory, Vec<String>>,
    pub transition_words: Vec<String>,
    pub action_words: Vec<String>,
    pub emotional_words: Vec<String>,
    pub advantage_patterns: Vec<String>,
    pub market_size_patterns: Vec<String>,
    pub market_acronym_pattern: String,
    pub market_value_patterns: Vec<String>,
    pub recommendations: RecommendationMessages,
}

impl Rubric {
    /// The rubric compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_RUBRIC)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        tracing::info!("Loaded rubric from {}", path.as_ref().display());
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let rubric: Rubric = serde_json::from_str(raw)?;
        rubric.validate()?;
        Ok(rubric)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(Error::Config("rubric has no section criteria".to_string()));
        }

        for section in &self.sections {
            if section.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(Error::Config(format!(
                    "section '{}' has no keywords",
                    section.name
                )));
            }
        }

        Ok(())
    }
}
