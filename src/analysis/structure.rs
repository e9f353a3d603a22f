use regex::Regex;

use crate::analysis::sections::SectionCoverage;
use crate::analysis::text::{count_matches, split_sentences, term_matcher, word_count};
use crate::error::Result;
use crate::models::{Rubric, StructureScores};

/// Sentence length the clarity score treats as ideal.
pub const OPTIMAL_SENTENCE_WORDS: f64 = 15.0;
/// Clarity points lost per word of distance from the optimal length.
pub const CLARITY_PENALTY_PER_WORD: f64 = 2.0;
pub const FLOW_SCALE: f64 = 1000.0;
pub const ENGAGEMENT_SCALE: f64 = 500.0;

/// Narrative-quality heuristics: clarity, flow, completeness, engagement.
pub struct StructureAnalyzer {
    transitions: Option<Regex>,
    action_words: Option<Regex>,
    emotional_words: Option<Regex>,
}

impl StructureAnalyzer {
    pub fn new(rubric: &Rubric) -> Result<Self> {
        Ok(Self {
            transitions: term_matcher(&rubric.transition_words)?,
            action_words: term_matcher(&rubric.action_words)?,
            emotional_words: term_matcher(&rubric.emotional_words)?,
        })
    }

    /// `coverage` supplies the binary section flags used for completeness.
    pub fn analyze(&self, text: &str, coverage: &SectionCoverage) -> StructureScores {
        let completeness = clamp_score(coverage.found_ratio() * 100.0);

        let sentences = split_sentences(text);
        if sentences.is_empty() {
            tracing::debug!("No sentences found, ratio-based structure scores default to 0");
            return StructureScores {
                completeness,
                ..StructureScores::default()
            };
        }

        let sentence_count = sentences.len() as f64;
        let total_words: usize = sentences.iter().map(|s| word_count(s)).sum();
        let avg_sentence_length = total_words as f64 / sentence_count;

        let clarity = clamp_score(
            100.0 - (avg_sentence_length - OPTIMAL_SENTENCE_WORDS) * CLARITY_PENALTY_PER_WORD,
        );

        let transition_count = count_matches(self.transitions.as_ref(), text);
        let flow = clamp_score(transition_count as f64 / sentence_count * FLOW_SCALE);

        let engaging = count_matches(self.action_words.as_ref(), text)
            + count_matches(self.emotional_words.as_ref(), text);
        let engagement = clamp_score(engaging as f64 / sentence_count * ENGAGEMENT_SCALE);

        let scores = StructureScores {
            clarity,
            flow,
            completeness,
            engagement,
        };
        tracing::debug!("Structure scores: {:?}", scores);
        scores
    }
}

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
