//! Tokenization helpers shared by the analyzers.

use regex::{Regex, RegexBuilder};

use crate::error::Result;

const SENTENCE_TERMINALS: [char; 3] = ['.', '!', '?'];
const CLOSING_PUNCTUATION: [char; 6] = ['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "inc", "ltd", "corp", "vs", "etc", "e.g", "i.e", "jr",
    "sr", "st", "approx", "est",
];

/// Splits text into sentences on `.`, `!` and `?` followed by whitespace or
/// the end of input. Decimal points and common abbreviations do not split.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !SENTENCE_TERMINALS.contains(&c) {
            continue;
        }

        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if SENTENCE_TERMINALS.contains(&next) || CLOSING_PUNCTUATION.contains(&next) {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let at_boundary = match chars.peek() {
            None => true,
            Some(&(_, next)) => next.is_whitespace(),
        };
        if !at_boundary || (c == '.' && ends_with_abbreviation(&text[start..i])) {
            continue;
        }

        push_sentence(&mut sentences, &text[start..end]);
        start = end;
    }

    push_sentence(&mut sentences, &text[start..]);
    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if trimmed.chars().any(char::is_alphanumeric) {
        sentences.push(trimmed);
    }
}

fn ends_with_abbreviation(prefix: &str) -> bool {
    prefix
        .split_whitespace()
        .last()
        .map(|token| ABBREVIATIONS.contains(&token.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Whitespace-delimited token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whitespace tokens with surrounding punctuation removed, keeping only
/// tokens that contain a letter or digit.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| t.chars().any(char::is_alphanumeric))
}

/// Estimates the syllable count of a single word from its vowel groups.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    // Silent trailing "e" ("make"), but not consonant + "le" ("table").
    let n = letters.len();
    if n > 2 && letters[n - 1] == 'e' && !is_vowel(letters[n - 2]) {
        let consonant_le = letters[n - 2] == 'l' && n > 3 && !is_vowel(letters[n - 3]);
        if !consonant_le && count > 1 {
            count -= 1;
        }
    }

    count.max(1)
}

/// Case-insensitive whole-word alternation over `terms`, or `None` when the
/// list is empty.
pub fn term_matcher(terms: &[String]) -> Result<Option<Regex>> {
    let escaped: Vec<String> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect();
    if escaped.is_empty() {
        return Ok(None);
    }

    let pattern = format!(r"\b(?:{})\b", escaped.join("|"));
    let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
    Ok(Some(regex))
}

/// Number of non-overlapping matches, zero when there is no matcher.
pub fn count_matches(matcher: Option<&Regex>, text: &str) -> usize {
    matcher.map(|re| re.find_iter(text).count()).unwrap_or(0)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
