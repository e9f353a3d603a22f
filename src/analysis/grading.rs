use crate::analysis::text::round_to;
use crate::models::{FinancialMetrics, Grade, ScoringPolicy, SentimentScores, StructureScores};

/// Financial presence flag when at least one metric was found.
pub const FINANCIAL_FOUND_SCORE: f64 = 50.0;
pub const FINANCIAL_MISSING_SCORE: f64 = 20.0;

/// Per-analyzer scores normalized to a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreComponents {
    pub section_coverage: f64,
    pub readability: f64,
    pub sentiment: f64,
    pub financial_presence: f64,
    pub structure: f64,
}

impl ScoreComponents {
    pub fn new(
        section_score: f64,
        readability: f64,
        sentiment: &SentimentScores,
        financial_metrics: &FinancialMetrics,
        structure: &StructureScores,
    ) -> Self {
        Self {
            section_coverage: section_score / 10.0 * 100.0,
            readability: readability.clamp(0.0, 100.0),
            sentiment: sentiment_pct(sentiment.compound),
            financial_presence: if financial_metrics.any_found() {
                FINANCIAL_FOUND_SCORE
            } else {
                FINANCIAL_MISSING_SCORE
            },
            structure: structure.average(),
        }
    }
}

/// Maps a compound score in [-1, 1] onto 0-100.
pub fn sentiment_pct(compound: f64) -> f64 {
    (compound + 1.0) * 50.0
}

#[derive(Debug, Clone)]
pub struct StructuralWeights {
    pub section_coverage: f64,
    pub readability: f64,
    pub sentiment: f64,
    pub structure: f64,
}

impl Default for StructuralWeights {
    fn default() -> Self {
        Self {
            section_coverage: 0.4,
            readability: 0.2,
            sentiment: 0.2,
            structure: 0.2,
        }
    }
}

pub struct GradeAggregator {
    weights: StructuralWeights,
}

impl GradeAggregator {
    pub fn new() -> Self {
        Self {
            weights: StructuralWeights::default(),
        }
    }

    pub fn with_weights(weights: StructuralWeights) -> Self {
        Self { weights }
    }

    /// Overall score clamped to [0, 100], unrounded. Grades are taken from
    /// this value.
    pub fn overall_score(&self, components: &ScoreComponents, policy: ScoringPolicy) -> f64 {
        let raw = match policy {
            ScoringPolicy::Basic => {
                (components.section_coverage
                    + components.readability
                    + components.sentiment
                    + components.financial_presence)
                    / 4.0
            }
            ScoringPolicy::Structural => {
                components.section_coverage * self.weights.section_coverage
                    + components.readability * self.weights.readability
                    + components.sentiment * self.weights.sentiment
                    + components.structure * self.weights.structure
            }
        };

        raw.clamp(0.0, 100.0)
    }

    /// Reported score rounded to one decimal, and the grade of the
    /// unrounded score.
    pub fn aggregate(&self, components: &ScoreComponents, policy: ScoringPolicy) -> (f64, Grade) {
        let overall = self.overall_score(components, policy);
        let grade = Grade::from_score(overall);
        let reported = round_to(overall, 1);
        tracing::debug!("{} policy overall {} -> {}", policy, reported, grade);
        (reported, grade)
    }
}

impl Default for GradeAggregator {
    fn default() -> Self {
        Self::new()
    }
}
