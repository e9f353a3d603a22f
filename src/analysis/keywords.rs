use std::collections::HashMap;

use crate::config::DEFAULT_MAX_KEYWORDS;
use crate::error::{Error, Result};

/// Term weighting over a single normalized document.
///
/// With one document every term has document frequency 1, so the smoothed
/// inverse document frequency is the same constant for all terms and the
/// ranking is plain term frequency.
pub struct KeywordExtractor {
    max_keywords: usize,
}

impl KeywordExtractor {
    pub fn new(max_keywords: usize) -> Self {
        Self { max_keywords }
    }

    /// Up to `max_keywords` terms, highest weight first, ties alphabetical.
    /// Empty when the text has no extractable terms.
    pub fn extract(&self, normalized: &str) -> Vec<String> {
        match self.weighted_terms(normalized) {
            Ok(terms) => terms.into_iter().map(|(term, _)| term).collect(),
            Err(e) if e.is_recoverable() => {
                tracing::debug!("Keyword extraction produced nothing: {}", e);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Keyword extraction failed: {}", e);
                Vec::new()
            }
        }
    }

    pub fn weighted_terms(&self, normalized: &str) -> Result<Vec<(String, f64)>> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for term in tokens(normalized) {
            *counts.entry(term).or_insert(0) += 1;
        }

        if counts.is_empty() {
            return Err(Error::DegenerateInput(
                "empty vocabulary after normalization".to_string(),
            ));
        }

        let documents: f64 = 1.0;
        let document_frequency: f64 = 1.0;
        let idf = ((1.0 + documents) / (1.0 + document_frequency)).ln() + 1.0;

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_keywords);

        let weights: Vec<f64> = ranked.iter().map(|(_, tf)| *tf as f64 * idf).collect();
        let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();

        Ok(ranked
            .into_iter()
            .zip(weights)
            .map(|((term, _), weight)| (term.to_string(), weight / norm))
            .collect())
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_KEYWORDS)
    }
}

/// Runs of two or more word characters.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_by_term_frequency() {
        let extractor = KeywordExtractor::new(3);
        let keywords = extractor.extract("market market market team team customer growth");
        assert_eq!(keywords, vec!["market", "team", "customer"]);
    }

    #[test]
    fn test_weights_are_l2_normalized() {
        let extractor = KeywordExtractor::default();
        let terms = extractor.weighted_terms("alpha alpha beta").unwrap();
        let norm: f64 = terms.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert!(terms[0].1 > terms[1].1);
    }

    #[test]
    fn test_limits_to_max_keywords() {
        let text = (0..40).map(|i| format!("term{i}")).collect::<Vec<_>>().join(" ");
        assert_eq!(KeywordExtractor::default().extract(&text).len(), 15);
    }

    #[test]
    fn test_degenerate_text_yields_empty() {
        let extractor = KeywordExtractor::default();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("a b c").is_empty());
        assert!(matches!(
            extractor.weighted_terms(""),
            Err(Error::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_is_deterministic() {
        let extractor = KeywordExtractor::default();
        let text = "zeta alpha mu beta gamma delta zeta alpha";
        assert_eq!(extractor.extract(text), extractor.extract(text));
        assert_eq!(extractor.extract(text)[..2], ["alpha", "zeta"]);
    }
}
