use std::sync::Arc;

use crate::lexicon::Lexicon;

/// Lowercases, strips punctuation, removes stop words and lemmatizes. Only
/// keyword extraction consumes the normalized form.
pub struct TextNormalizer {
    lexicon: Arc<Lexicon>,
}

impl TextNormalizer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped: String = lowered
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        stripped
            .split_whitespace()
            .filter(|word| !self.lexicon.is_stop_word(word))
            .map(|word| self.lemmatize(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Noun lemmatization: irregular forms from the lexicon, then plural
    /// suffix rules.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.lexicon.lemma_exception(word) {
            return lemma.to_string();
        }

        if word.chars().count() <= 3 || !word.ends_with('s') {
            return word.to_string();
        }

        if ["ss", "us", "is", "ous"].iter().any(|s| word.ends_with(s)) {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if stem.chars().count() >= 2 {
                return format!("{}y", stem);
            }
        }

        for suffix in ["sses", "xes", "zes", "ches", "shes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }

        word[..word.len() - 1].to_string()
    }
}
