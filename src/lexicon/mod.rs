pub mod modifiers;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};

pub use modifiers::{booster_scalar, is_negation};

const EMBEDDED_STOP_WORDS: &str = include_str!("../../data/lexicon/stopwords.txt");
const EMBEDDED_LEMMAS: &str = include_str!("../../data/lexicon/lemmas.tsv");
const EMBEDDED_SENTIMENT: &str = include_str!("../../data/lexicon/sentiment.tsv");

const STOP_WORDS_FILE: &str = "stopwords.txt";
const LEMMAS_FILE: &str = "lemmas.tsv";
const SENTIMENT_FILE: &str = "sentiment.tsv";

static GLOBAL: OnceCell<Arc<Lexicon>> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconSource {
    Embedded,
    /// Directory holding `stopwords.txt`, `lemmas.tsv` and `sentiment.tsv`.
    Directory(PathBuf),
}

/// Lexical resources shared by the analyzers: stop words, irregular lemma
/// forms and sentiment valences.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    stop_words: HashSet<String>,
    lemma_exceptions: HashMap<String, String>,
    sentiment: Option<HashMap<String, f64>>,
}

impl Lexicon {
    /// Loads the process-wide lexicon once. Later calls return the instance
    /// created by the first call, whatever source they ask for.
    pub fn init(source: LexiconSource) -> Arc<Lexicon> {
        let mut loaded_now = false;
        let lexicon = GLOBAL
            .get_or_init(|| {
                loaded_now = true;
                Arc::new(Self::load(&source))
            })
            .clone();

        if !loaded_now {
            tracing::debug!("Lexicon already initialized, ignoring {:?}", source);
        }

        lexicon
    }

    /// The process-wide lexicon, loading the embedded one if nothing was
    /// initialized yet.
    pub fn global() -> Arc<Lexicon> {
        Self::init(LexiconSource::Embedded)
    }

    pub fn load(source: &LexiconSource) -> Self {
        match source {
            LexiconSource::Embedded => Self::embedded(),
            LexiconSource::Directory(dir) => Self::from_dir(dir),
        }
    }

    pub fn embedded() -> Self {
        Self {
            stop_words: parse_word_list(EMBEDDED_STOP_WORDS),
            lemma_exceptions: parse_lemmas(EMBEDDED_LEMMAS),
            sentiment: Some(parse_valences(EMBEDDED_SENTIMENT)),
        }
    }

    /// A lexicon with every resource unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads each resource independently, degrading the ones that fail.
    pub fn from_dir(dir: &Path) -> Self {
        let stop_words = match read_resource(dir, STOP_WORDS_FILE) {
            Ok(raw) => parse_word_list(&raw),
            Err(e) => {
                tracing::warn!("{}; continuing without stop words", e);
                HashSet::new()
            }
        };

        let lemma_exceptions = match read_resource(dir, LEMMAS_FILE) {
            Ok(raw) => parse_lemmas(&raw),
            Err(e) => {
                tracing::warn!("{}; lemmatizing with suffix rules only", e);
                HashMap::new()
            }
        };

        let sentiment = match read_resource(dir, SENTIMENT_FILE) {
            Ok(raw) => Some(parse_valences(&raw)),
            Err(e) => {
                tracing::warn!("{}; sentiment will be reported as neutral", e);
                None
            }
        };

        tracing::info!(
            "Loaded lexicon from {} ({} stop words, {} lemma exceptions, sentiment {})",
            dir.display(),
            stop_words.len(),
            lemma_exceptions.len(),
            if sentiment.is_some() { "available" } else { "unavailable" }
        );

        Self {
            stop_words,
            lemma_exceptions,
            sentiment,
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn lemma_exception(&self, word: &str) -> Option<&str> {
        self.lemma_exceptions.get(word).map(String::as_str)
    }

    pub fn sentiment(&self) -> Result<&HashMap<String, f64>> {
        self.sentiment
            .as_ref()
            .ok_or_else(|| Error::ResourceUnavailable("sentiment lexicon".to_string()))
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }
}

fn read_resource(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    std::fs::read_to_string(&path).map_err(|e| {
        Error::ResourceUnavailable(format!("{} ({})", path.display(), e))
    })
}

fn data_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
}

fn parse_word_list(raw: &str) -> HashSet<String> {
    data_lines(raw).map(str::to_lowercase).collect()
}

fn parse_lemmas(raw: &str) -> HashMap<String, String> {
    data_lines(raw)
        .filter_map(|line| {
            let mut parts = line.split('\t');
            let form = parts.next()?.trim();
            let lemma = parts.next()?.trim();
            Some((form.to_lowercase(), lemma.to_lowercase()))
        })
        .collect()
}

fn parse_valences(raw: &str) -> HashMap<String, f64> {
    data_lines(raw)
        .filter_map(|line| {
            let mut parts = line.split('\t');
            let token = parts.next()?.trim();
            match parts.next()?.trim().parse::<f64>() {
                Ok(valence) => Some((token.to_lowercase(), valence)),
                Err(_) => {
                    tracing::debug!("Skipping malformed sentiment entry: {}", line);
                    None
                }
            }
        })
        .collect()
}
