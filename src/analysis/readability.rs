use crate::analysis::text::{count_syllables, round_to, split_sentences, word_count, words};
use crate::error::{Error, Result};

/// Score returned by the fallback when the text has no sentences at all.
pub const NEUTRAL_READABILITY: f64 = 50.0;
/// Sentence length the fallback formula treats as ideal.
pub const OPTIMAL_SENTENCE_WORDS: f64 = 15.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReadabilityScorer;

impl ReadabilityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Flesch reading ease, or the sentence-length fallback when the primary
    /// formula cannot be computed. Not clamped.
    pub fn score(&self, text: &str) -> f64 {
        match self.flesch_reading_ease(text) {
            Ok(score) => score,
            Err(e) if e.is_recoverable() => {
                tracing::debug!("Readability falling back to sentence-length formula: {}", e);
                self.fallback(text)
            }
            Err(e) => {
                tracing::warn!("Unexpected readability failure, using fallback formula: {}", e);
                self.fallback(text)
            }
        }
    }

    pub fn flesch_reading_ease(&self, text: &str) -> Result<f64> {
        let tokens: Vec<&str> = words(text).collect();
        if tokens.is_empty() {
            return Err(Error::DegenerateInput("no words to score".to_string()));
        }

        let syllables: usize = tokens.iter().map(|w| count_syllables(w)).sum();
        if syllables == 0 {
            return Err(Error::DegenerateInput("no syllables to score".to_string()));
        }

        let word_total = tokens.len() as f64;
        let sentence_total = split_sentences(text).len().max(1) as f64;

        let score = 206.835
            - 1.015 * (word_total / sentence_total)
            - 84.6 * (syllables as f64 / word_total);

        Ok(round_to(score, 2))
    }

    /// `100 - (avg_words_per_sentence - 15) * 2` over `.`-delimited segments,
    /// clamped to 0-100.
    pub fn fallback(&self, text: &str) -> f64 {
        let total_words = word_count(text);
        let sentences = text.split('.').filter(|s| !s.trim().is_empty()).count();
        if sentences == 0 {
            return NEUTRAL_READABILITY;
        }

        let avg_sentence_length = total_words as f64 / sentences as f64;
        (100.0 - (avg_sentence_length - OPTIMAL_SENTENCE_WORDS) * 2.0).clamp(0.0, 100.0)
    }
}
