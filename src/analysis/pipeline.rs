use std::sync::Arc;

use crate::analysis::financial::FinancialMetricExtractor;
use crate::analysis::grading::{GradeAggregator, ScoreComponents};
use crate::analysis::keywords::KeywordExtractor;
use crate::analysis::market::{CompetitiveAdvantageExtractor, MarketOpportunityAnalyzer};
use crate::analysis::normalizer::TextNormalizer;
use crate::analysis::readability::ReadabilityScorer;
use crate::analysis::recommendations::RecommendationGenerator;
use crate::analysis::sections::SectionCoverageAnalyzer;
use crate::analysis::sentiment::SentimentScorer;
use crate::analysis::structure::StructureAnalyzer;
use crate::config::{AnalyzerConfig, Config};
use crate::error::{Error, Result};
use crate::lexicon::{Lexicon, LexiconSource};
use crate::models::{AnalysisReport, Rubric, ScoringPolicy};

/// Runs every analyzer over a pitch text and assembles the report.
///
/// All analyzers are compiled once from the rubric; `analyze` is a pure
/// function of its input and never fails.
pub struct PitchAnalyzer {
    normalizer: TextNormalizer,
    sections: SectionCoverageAnalyzer,
    readability: ReadabilityScorer,
    sentiment: SentimentScorer,
    keywords: KeywordExtractor,
    financial: FinancialMetricExtractor,
    structure: StructureAnalyzer,
    advantages: CompetitiveAdvantageExtractor,
    market: MarketOpportunityAnalyzer,
    aggregator: GradeAggregator,
    recommender: RecommendationGenerator,
}

impl PitchAnalyzer {
    /// Uses the process-wide lexicon.
    pub fn new(rubric: &Rubric, config: AnalyzerConfig) -> Result<Self> {
        Self::with_lexicon(rubric, config, Lexicon::global())
    }

    pub fn with_lexicon(rubric: &Rubric, config: AnalyzerConfig, lexicon: Arc<Lexicon>) -> Result<Self> {
        rubric.validate()?;

        Ok(Self {
            normalizer: TextNormalizer::new(lexicon.clone()),
            sections: SectionCoverageAnalyzer::new(&rubric.sections)?,
            readability: ReadabilityScorer::new(),
            sentiment: SentimentScorer::new(lexicon),
            keywords: KeywordExtractor::new(config.max_keywords),
            financial: FinancialMetricExtractor::new(&rubric.financial_patterns)?,
            structure: StructureAnalyzer::new(rubric)?,
            advantages: CompetitiveAdvantageExtractor::new(rubric)?,
            market: MarketOpportunityAnalyzer::new(rubric)?,
            aggregator: GradeAggregator::new(),
            recommender: RecommendationGenerator::new(rubric.recommendations.clone()),
        })
    }

    /// Loads the rubric and lexicon named by `config`, falling back to the
    /// embedded ones.
    pub fn from_config(config: &Config) -> Result<Self> {
        let rubric = match &config.rubric_path {
            Some(path) => Rubric::from_path(path)?,
            None => Rubric::embedded()?,
        };

        let source = match &config.lexicon_dir {
            Some(dir) => LexiconSource::Directory(dir.clone()),
            None => LexiconSource::Embedded,
        };
        let lexicon = Lexicon::init(source);

        tracing::info!(
            "Analyzer ready: {} section criteria, {} stop words",
            rubric.sections.len(),
            lexicon.stop_word_count()
        );

        Self::with_lexicon(&rubric, AnalyzerConfig::from(config), lexicon)
    }

    /// Report scored with the basic policy.
    pub fn summary(&self, text: &str) -> AnalysisReport {
        self.analyze(text, ScoringPolicy::Basic)
    }

    /// Report scored with the structural policy.
    pub fn comprehensive(&self, text: &str) -> AnalysisReport {
        self.analyze(text, ScoringPolicy::Structural)
    }

    pub fn analyze(&self, text: &str, policy: ScoringPolicy) -> AnalysisReport {
        tracing::debug!("Analyzing {} characters with {} policy", text.chars().count(), policy);

        let coverage = self.sections.analyze(text);
        let readability = self.readability.score(text);
        let sentiment = self.sentiment.score(text);
        let keywords = self.keywords.extract(&self.normalizer.normalize(text));
        let financial_metrics = self.financial.extract(text);
        let structure = self.structure.analyze(text, &coverage);
        let competitive_advantages = self.advantages.extract(text);
        let market_opportunity = self.market.analyze(text);

        let components = ScoreComponents::new(
            coverage.score,
            readability,
            &sentiment,
            &financial_metrics,
            &structure,
        );
        let (overall_score, grade) = self.aggregator.aggregate(&components, policy);
        let recommendations = self.recommender.generate(&components, &financial_metrics);

        tracing::info!(
            "Pitch graded {} ({}/100, {} policy, {}/{} sections)",
            grade,
            overall_score,
            policy,
            coverage.strengths.len(),
            self.sections.criteria_count()
        );

        AnalysisReport {
            section_score: coverage.score,
            strengths: coverage.strengths,
            weaknesses: coverage.weaknesses,
            tips: coverage.tips,
            section_scores: coverage.section_scores,
            readability,
            sentiment,
            keywords,
            financial_metrics,
            structure,
            competitive_advantages,
            market_opportunity,
            policy,
            overall_score,
            grade,
            recommendations,
        }
    }
}

/// Caller-side length check. `PitchAnalyzer::analyze` accepts any text;
/// hosts reject short or oversized input before calling it.
pub fn validate_input(text: &str, min_length: usize, max_length: usize) -> Result<()> {
    let length = text.trim().chars().count();
    if length < min_length {
        return Err(Error::InsufficientText {
            length,
            minimum: min_length,
        });
    }
    if length > max_length {
        return Err(Error::TextTooLong {
            length,
            maximum: max_length,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MAX_TEXT_LENGTH, DEFAULT_MIN_TEXT_LENGTH};
    use crate::models::{Grade, MetricCategory, SentimentScores, StructureScores};

    const SAMPLE_PITCH: &str = "\
        Small businesses face a painful problem: manual invoicing wastes ten hours every week. \
        Our solution is a platform that automates billing end to end. \
        The workflow automation market is valued at $8.5 billion, and our TAM keeps growing. \
        Our product demo shows invoices sent in seconds. \
        We have 2,500 users and $180K revenue, with growth of 15% month over month. \
        Our business model is a simple subscription with transparent pricing. \
        Unlike competitors, we set up in five minutes. \
        Our team of founders has built and scaled two startups. \
        We are seeking $2M to grow sales and build our engineering team.";

    fn analyzer() -> PitchAnalyzer {
        PitchAnalyzer::with_lexicon(
            &Rubric::embedded().unwrap(),
            AnalyzerConfig::default(),
            Arc::new(Lexicon::embedded()),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_text_produces_complete_report() {
        let report = analyzer().comprehensive("");
        assert_eq!(report.section_score, 0.0);
        assert!(report.strengths.is_empty());
        assert_eq!(report.weaknesses.len(), 9);
        assert!(!report.financial_metrics.any_found());
        assert_eq!(report.structure.clarity, 0.0);
        assert_eq!(report.structure.flow, 0.0);
        assert_eq!(report.structure.engagement, 0.0);
        assert_eq!(report.sentiment, SentimentScores::neutral());
        assert!(report.keywords.is_empty());
        assert_eq!(report.policy, ScoringPolicy::Structural);
    }

    #[test]
    fn test_sample_pitch_covers_every_section() {
        let report = analyzer().comprehensive(SAMPLE_PITCH);
        assert_eq!(report.strengths.len(), 9, "weaknesses: {:?}", report.weaknesses);
        assert!(report.weaknesses.is_empty());
        assert!(report.tips.is_empty());
        assert_eq!(report.structure.completeness, 100.0);
        assert!(!report.financial_metrics.get(MetricCategory::Users).is_empty());
        assert!(report.market_opportunity.size_mentioned);
        assert!(report.market_opportunity.tam_sam_som);
        assert_eq!(
            report.market_opportunity.market_size_value.as_deref(),
            Some("8.5 billion")
        );
        assert!(!report.competitive_advantages.is_empty());
        assert!(report.keywords.len() <= 15);
        assert!(!report.keywords.is_empty());
    }

    #[test]
    fn test_policies_share_analysis_but_not_score() {
        let analyzer = analyzer();
        let basic = analyzer.summary(SAMPLE_PITCH);
        let structural = analyzer.comprehensive(SAMPLE_PITCH);

        assert_eq!(basic.policy, ScoringPolicy::Basic);
        assert_eq!(structural.policy, ScoringPolicy::Structural);
        assert_eq!(basic.section_score, structural.section_score);
        assert_eq!(basic.keywords, structural.keywords);
        assert_eq!(basic.financial_metrics, structural.financial_metrics);
        for report in [&basic, &structural] {
            // The grade comes from the unrounded score, within 0.05 of the reported one.
            assert!(report.grade >= Grade::from_score(report.overall_score - 0.051));
            assert!(report.grade <= Grade::from_score(report.overall_score + 0.051));
        }
    }

    #[test]
    fn test_basic_policy_uses_financial_flag() {
        let analyzer = analyzer();
        let without = analyzer.summary("Our solution fixes a real problem for teams everywhere today.");
        let with = analyzer.summary("Our solution fixes a real problem. We raised $2M from investors.");
        assert!(with.financial_metrics.any_found());
        assert!(!without.financial_metrics.any_found());
        assert!(without
            .recommendations
            .contains(&"Add key financial metrics and traction data".to_string()));
        assert!(!with
            .recommendations
            .contains(&"Add key financial metrics and traction data".to_string()));
    }

    #[test]
    fn test_report_is_deterministic() {
        let analyzer = analyzer();
        let first = analyzer.comprehensive(SAMPLE_PITCH);
        let second = analyzer.comprehensive(SAMPLE_PITCH);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_rejects_invalid_rubric_pattern() {
        let mut rubric = Rubric::embedded().unwrap();
        rubric.advantage_patterns.push("(unclosed".to_string());
        let result = PitchAnalyzer::with_lexicon(
            &rubric,
            AnalyzerConfig::default(),
            Arc::new(Lexicon::embedded()),
        );
        assert!(matches!(result, Err(Error::InvalidPattern(_))));
    }

    #[test]
    fn test_degraded_lexicon_still_reports() {
        let analyzer = PitchAnalyzer::with_lexicon(
            &Rubric::embedded().unwrap(),
            AnalyzerConfig::default(),
            Arc::new(Lexicon::empty()),
        )
        .unwrap();
        let report = analyzer.comprehensive(SAMPLE_PITCH);
        assert_eq!(report.sentiment, SentimentScores::neutral());
        assert_eq!(report.strengths.len(), 9);
        assert!(!report.keywords.is_empty());
        assert_ne!(report.structure, StructureScores::default());
    }

    #[test]
    fn test_validate_input_boundary() {
        let short = "a".repeat(DEFAULT_MIN_TEXT_LENGTH - 1);
        let exact = "a".repeat(DEFAULT_MIN_TEXT_LENGTH);

        assert!(matches!(
            validate_input(&short, DEFAULT_MIN_TEXT_LENGTH, DEFAULT_MAX_TEXT_LENGTH),
            Err(Error::InsufficientText { length: 49, minimum: 50 })
        ));
        assert!(validate_input(&exact, DEFAULT_MIN_TEXT_LENGTH, DEFAULT_MAX_TEXT_LENGTH).is_ok());
        assert!(matches!(
            validate_input(&"a".repeat(11), 1, 10),
            Err(Error::TextTooLong { length: 11, maximum: 10 })
        ));
        // Surrounding whitespace does not count toward the minimum.
        let padded = format!("   {}   ", short);
        assert!(validate_input(&padded, DEFAULT_MIN_TEXT_LENGTH, DEFAULT_MAX_TEXT_LENGTH).is_err());
    }

    #[test]
    fn test_core_accepts_short_input() {
        let report = analyzer().summary("Short.");
        assert!((0.0..=100.0).contains(&report.overall_score));
    }
}
