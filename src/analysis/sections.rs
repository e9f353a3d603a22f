use regex::{Regex, RegexBuilder};

use crate::analysis::text::round_to;
use crate::error::Result;
use crate::models::{SectionCriterion, SectionScoreRecord};

/// Confidence contributed by each keyword occurrence.
pub const OCCURRENCE_WEIGHT: f64 = 0.2;
pub const MAX_CONFIDENCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionCoverage {
    /// Mean confidence scaled to 0-10, one decimal.
    pub score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub tips: Vec<String>,
    pub section_scores: SectionScoreRecord,
    /// Per-criterion confidence in rubric order; zero for missing sections.
    pub confidences: Vec<f64>,
}

impl SectionCoverage {
    /// Share of criteria found, ignoring confidence.
    pub fn found_ratio(&self) -> f64 {
        if self.section_scores.is_empty() {
            return 0.0;
        }
        self.section_scores.found_count() as f64 / self.section_scores.len() as f64
    }
}

struct KeywordMatcher {
    phrase: String,
    multi_word: bool,
    pattern: Regex,
}

impl KeywordMatcher {
    fn new(keyword: &str) -> Result<Self> {
        let phrase = keyword.trim().to_lowercase();
        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&phrase)))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            multi_word: phrase.split_whitespace().count() > 1,
            phrase,
            pattern,
        })
    }

    fn is_present(&self, text: &str, lowered: &str) -> bool {
        if self.multi_word {
            lowered.contains(&self.phrase)
        } else {
            self.pattern.is_match(text)
        }
    }

    fn occurrences(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

struct CompiledCriterion {
    name: String,
    tip: String,
    keywords: Vec<KeywordMatcher>,
}

pub struct SectionCoverageAnalyzer {
    criteria: Vec<CompiledCriterion>,
}

impl SectionCoverageAnalyzer {
    pub fn new(sections: &[SectionCriterion]) -> Result<Self> {
        let criteria = sections
            .iter()
            .map(|section| -> Result<CompiledCriterion> {
                let keywords = section
                    .keywords
                    .iter()
                    .filter(|k| !k.trim().is_empty())
                    .map(|k| KeywordMatcher::new(k))
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledCriterion {
                    name: section.name.clone(),
                    tip: section.tip.clone(),
                    keywords,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { criteria })
    }

    pub fn criteria_count(&self) -> usize {
        self.criteria.len()
    }

    pub fn analyze(&self, text: &str) -> SectionCoverage {
        let lowered = text.to_lowercase();
        let mut coverage = SectionCoverage {
            score: 0.0,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            tips: Vec::new(),
            section_scores: SectionScoreRecord::new(),
            confidences: Vec::with_capacity(self.criteria.len()),
        };

        let mut points = 0.0;
        for criterion in &self.criteria {
            let (found, confidence) = self.score_criterion(criterion, text, &lowered);

            coverage.section_scores.push(criterion.name.clone(), found);
            coverage.confidences.push(confidence);

            if found {
                points += confidence;
                coverage.strengths.push(criterion.name.clone());
            } else {
                coverage.weaknesses.push(criterion.name.clone());
                coverage.tips.push(criterion.tip.clone());
            }
        }

        if !self.criteria.is_empty() {
            coverage.score = round_to(points / self.criteria.len() as f64 * 10.0, 1);
        }

        tracing::debug!(
            "Section coverage {}/10 ({} of {} sections found)",
            coverage.score,
            coverage.strengths.len(),
            self.criteria.len()
        );

        coverage
    }

    fn score_criterion(&self, criterion: &CompiledCriterion, text: &str, lowered: &str) -> (bool, f64) {
        let mut found = false;
        let mut confidence: f64 = 0.0;

        for keyword in &criterion.keywords {
            if keyword.is_present(text, lowered) {
                found = true;
                confidence += keyword.occurrences(text) as f64 * OCCURRENCE_WEIGHT;
            }
        }

        if !found {
            return (false, 0.0);
        }
        (true, confidence.min(MAX_CONFIDENCE))
    }
}
