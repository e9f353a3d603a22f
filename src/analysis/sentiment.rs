use std::collections::HashMap;
use std::sync::Arc;

use crate::analysis::text::round_to;
use crate::lexicon::{booster_scalar, is_negation, Lexicon};
use crate::models::SentimentScores;

/// Emphasis added to an ALL-CAPS sentiment word in mixed-case text.
const CAPS_INCREMENT: f64 = 0.733;
/// Multiplier applied to a valence preceded by a negation.
const NEGATION_SCALAR: f64 = -0.74;
/// Normalization constant for the compound score.
const COMPOUND_ALPHA: f64 = 15.0;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;
/// How many preceding tokens can modify a sentiment word.
const MODIFIER_WINDOW: usize = 3;

/// Lexicon-based polarity scorer producing neg/neu/pos proportions and a
/// normalized compound score in [-1, 1].
pub struct SentimentScorer {
    lexicon: Arc<Lexicon>,
}

impl SentimentScorer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn score(&self, text: &str) -> SentimentScores {
        let valences = match self.lexicon.sentiment() {
            Ok(valences) => valences,
            Err(e) => {
                tracing::warn!("{}; reporting neutral sentiment", e);
                return SentimentScores::neutral();
            }
        };

        let tokens = tokenize(text);
        if tokens.is_empty() {
            tracing::debug!("No tokens to score for sentiment");
            return SentimentScores::neutral();
        }

        let sentiments = self.token_valences(&tokens, valences);
        let sentiments = apply_but_shift(&tokens, sentiments);
        let punctuation = punctuation_emphasis(text);

        polarity(&sentiments, punctuation)
    }

    fn token_valences(&self, tokens: &[&str], valences: &HashMap<String, f64>) -> Vec<f64> {
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let caps_differential = has_caps_differential(tokens);

        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let word = lowered[i].as_str();
                if booster_scalar(word).is_some() {
                    return 0.0;
                }
                let Some(&base) = valences.get(word) else {
                    return 0.0;
                };

                let mut valence = base;
                if caps_differential && is_all_caps(token) {
                    valence += CAPS_INCREMENT * valence.signum();
                }

                for distance in 1..=MODIFIER_WINDOW.min(i) {
                    let preceding = lowered[i - distance].as_str();
                    if !valences.contains_key(preceding) {
                        let mut scalar =
                            booster_adjustment(tokens[i - distance], preceding, valence, caps_differential);
                        scalar *= match distance {
                            2 => 0.95,
                            3 => 0.9,
                            _ => 1.0,
                        };
                        valence += scalar;
                    }
                    if is_negation(preceding) {
                        valence *= NEGATION_SCALAR;
                    }
                }

                valence
            })
            .collect()
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| t.chars().count() > 1)
        .collect()
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && token.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
}

fn has_caps_differential(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

fn booster_adjustment(token: &str, lowered: &str, valence: f64, caps_differential: bool) -> f64 {
    let Some(mut scalar) = booster_scalar(lowered) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if caps_differential && is_all_caps(token) {
        scalar += CAPS_INCREMENT * valence.signum();
    }
    scalar
}

/// Sentiment before "but" is dampened, after it amplified.
fn apply_but_shift(tokens: &[&str], mut sentiments: Vec<f64>) -> Vec<f64> {
    let Some(pivot) = tokens.iter().position(|t| t.eq_ignore_ascii_case("but")) else {
        return sentiments;
    };

    for (i, sentiment) in sentiments.iter_mut().enumerate() {
        if i < pivot {
            *sentiment *= 0.5;
        } else if i > pivot {
            *sentiment *= 1.5;
        }
    }
    sentiments
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * QUESTION_INCREMENT,
        _ => MAX_QUESTION_EMPHASIS,
    };

    exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
}

fn polarity(sentiments: &[f64], punctuation: f64) -> SentimentScores {
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += punctuation;
    } else if sum < 0.0 {
        sum -= punctuation;
    }
    let compound = (sum / (sum * sum + COMPOUND_ALPHA).sqrt()).clamp(-1.0, 1.0);

    let mut positive: f64 = 0.0;
    let mut negative: f64 = 0.0;
    let mut neutral: f64 = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            positive += s + 1.0;
        } else if s < 0.0 {
            negative += s - 1.0;
        } else {
            neutral += 1.0;
        }
    }

    if positive > negative.abs() {
        positive += punctuation;
    } else if positive < negative.abs() {
        negative -= punctuation;
    }

    let total = positive + negative.abs() + neutral;
    if total == 0.0 {
        return SentimentScores::neutral();
    }

    SentimentScores {
        neg: round_to((negative / total).abs(), 3),
        neu: round_to((neutral / total).abs(), 3),
        pos: round_to((positive / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> SentimentScorer {
        SentimentScorer::new(Arc::new(Lexicon::embedded()))
    }

    #[test]
    fn test_positive_text() {
        let scores = scorer().score("Our team is excellent and customers love the product.");
        assert!(scores.compound > 0.5, "compound was {}", scores.compound);
        assert!(scores.pos > scores.neg);
    }

    #[test]
    fn test_negative_text() {
        let scores = scorer().score("The process is broken, slow and frustrating.");
        assert!(scores.compound < -0.5, "compound was {}", scores.compound);
        assert!(scores.neg > scores.pos);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let plain = scorer().score("The results are good.");
        let negated = scorer().score("The results are not good.");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn test_booster_intensifies() {
        let plain = scorer().score("The results are good.");
        let boosted = scorer().score("The results are very good.");
        assert!(boosted.compound > plain.compound);
    }

    #[test]
    fn test_exclamation_intensifies() {
        let plain = scorer().score("The results are good.");
        let excited = scorer().score("The results are good!!!");
        assert!(excited.compound > plain.compound);
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        let scores = scorer().score("The market is difficult but our product is great.");
        assert!(scores.compound > 0.0);
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let scores = scorer().score("We solve a painful problem with a great solution.");
        let total = scores.neg + scores.neu + scores.pos;
        assert!((total - 1.0).abs() < 0.01, "total was {}", total);
        assert!(scores.compound >= -1.0 && scores.compound <= 1.0);
    }

    #[test]
    fn test_reference_compounds() {
        let scorer = scorer();
        let cases = [
            ("The book was good.", 0.4404),
            ("VADER is smart, handsome, and funny.", 0.8316),
            ("VADER is smart, handsome, and funny!", 0.8439),
            ("VADER is very smart, handsome, and funny.", 0.8545),
            ("VADER is VERY SMART, handsome, and FUNNY.", 0.9227),
            ("VADER is VERY SMART, handsome, and FUNNY!!!", 0.9342),
            ("VADER is not smart, handsome, nor funny.", -0.7424),
            ("Today SUX!", -0.5461),
            ("Not bad at all", 0.431),
            ("At least it isn't a horrible book.", 0.431),
        ];
        for (text, expected) in cases {
            let scores = scorer.score(text);
            assert!(
                (scores.compound - expected).abs() < 1e-9,
                "{}: expected {}, got {}",
                text,
                expected,
                scores.compound
            );
        }

        let scores = scorer.score("VADER is smart, handsome, and funny.");
        assert_eq!((scores.neg, scores.neu, scores.pos), (0.0, 0.254, 0.746));
    }

    #[test]
    fn test_common_pitch_vocabulary_is_scored() {
        let scores = scorer()
            .score("We are thrilled to disrupt a stagnant industry and customers adore us.");
        assert!(scores.compound > 0.5, "compound was {}", scores.compound);
        assert!(scores.neg > 0.0);
    }

    #[test]
    fn test_empty_text_is_neutral() {
        assert_eq!(scorer().score(""), SentimentScores::neutral());
        assert_eq!(scorer().score("! ? ."), SentimentScores::neutral());
    }

    #[test]
    fn test_text_without_lexicon_words_is_fully_neutral() {
        let scores = scorer().score("Quarterly logistics routing report.");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neu, 1.0);
    }

    #[test]
    fn test_unavailable_lexicon_is_neutral() {
        let scorer = SentimentScorer::new(Arc::new(Lexicon::empty()));
        assert_eq!(scorer.score("This is a great product!"), SentimentScores::neutral());
    }
}
