pub mod config;
pub mod error;
pub mod models;
pub mod lexicon;
pub mod analysis;
pub mod cache;

pub use config::{AnalyzerConfig, Config};
pub use error::{Error, Result};
pub use lexicon::{Lexicon, LexiconSource};
pub use analysis::{validate_input, PitchAnalyzer};
pub use cache::AnalysisCache;
pub use models::{AnalysisReport, Grade, Rubric, ScoringPolicy};
