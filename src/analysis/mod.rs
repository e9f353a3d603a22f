pub mod text;
pub mod normalizer;
pub mod sections;
pub mod readability;
pub mod sentiment;
pub mod keywords;
pub mod financial;
pub mod structure;
pub mod market;
pub mod grading;
pub mod recommendations;
pub mod pipeline;

pub use normalizer::TextNormalizer;
pub use sections::{SectionCoverage, SectionCoverageAnalyzer};
pub use readability::ReadabilityScorer;
pub use sentiment::SentimentScorer;
pub use keywords::KeywordExtractor;
pub use financial::FinancialMetricExtractor;
pub use structure::StructureAnalyzer;
pub use market::{CompetitiveAdvantageExtractor, MarketOpportunityAnalyzer};
pub use grading::{GradeAggregator, ScoreComponents};
pub use recommendations::RecommendationGenerator;
pub use pipeline::{validate_input, PitchAnalyzer};
