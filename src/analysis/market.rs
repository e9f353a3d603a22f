use regex::{Regex, RegexBuilder};

use crate::error::Result;
use crate::models::{MarketOpportunity, Rubric};

pub const MAX_ADVANTAGES: usize = 5;

fn compile(pattern: &str, dot_matches_new_line: bool) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(dot_matches_new_line)
        .build()?)
}

/// Extracts claimed differentiators ("unlike competitors ...",
/// "our proprietary technology ...").
pub struct CompetitiveAdvantageExtractor {
    patterns: Vec<Regex>,
}

impl CompetitiveAdvantageExtractor {
    pub fn new(rubric: &Rubric) -> Result<Self> {
        let patterns = rubric
            .advantage_patterns
            .iter()
            .map(|p| compile(p, true))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// First five matches, pattern by pattern in match order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.patterns
            .iter()
            .flat_map(|re| re.find_iter(text))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
            .take(MAX_ADVANTAGES)
            .collect()
    }
}

pub struct MarketOpportunityAnalyzer {
    size_patterns: Vec<Regex>,
    acronym: Regex,
    value_patterns: Vec<Regex>,
}

impl MarketOpportunityAnalyzer {
    pub fn new(rubric: &Rubric) -> Result<Self> {
        Ok(Self {
            size_patterns: rubric
                .market_size_patterns
                .iter()
                .map(|p| compile(p, false))
                .collect::<Result<Vec<_>>>()?,
            acronym: compile(&rubric.market_acronym_pattern, false)?,
            value_patterns: rubric
                .market_value_patterns
                .iter()
                .map(|p| compile(p, false))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    pub fn analyze(&self, text: &str) -> MarketOpportunity {
        let tam_sam_som = self.acronym.is_match(text);
        let size_mentioned = tam_sam_som || self.size_patterns.iter().any(|re| re.is_match(text));

        // First capture group of the first value pattern that matches.
        let market_size_value = self.value_patterns.iter().find_map(|re| {
            re.captures(text)
                .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
                .map(|m| m.as_str().trim().to_string())
        });

        MarketOpportunity {
            size_mentioned,
            tam_sam_som,
            market_size_value,
        }
    }
}
