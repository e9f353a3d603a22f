use crate::analysis::grading::ScoreComponents;
use crate::models::{FinancialMetrics, RecommendationMessages};

pub const MAX_RECOMMENDATIONS: usize = 5;
pub const SECTION_COVERAGE_THRESHOLD: f64 = 70.0;
pub const READABILITY_THRESHOLD: f64 = 60.0;
pub const SENTIMENT_THRESHOLD: f64 = 60.0;

/// Threshold rules evaluated in a fixed order.
pub struct RecommendationGenerator {
    messages: RecommendationMessages,
}

impl RecommendationGenerator {
    pub fn new(messages: RecommendationMessages) -> Self {
        Self { messages }
    }

    pub fn generate(&self, components: &ScoreComponents, financial: &FinancialMetrics) -> Vec<String> {
        let rules = [
            (
                components.section_coverage < SECTION_COVERAGE_THRESHOLD,
                &self.messages.section_coverage,
            ),
            (!financial.any_found(), &self.messages.financial_metrics),
            (
                components.readability < READABILITY_THRESHOLD,
                &self.messages.readability,
            ),
            (
                components.sentiment < SENTIMENT_THRESHOLD,
                &self.messages.sentiment,
            ),
        ];

        rules
            .into_iter()
            .filter(|(triggered, _)| *triggered)
            .map(|(_, message)| message.clone())
            .take(MAX_RECOMMENDATIONS)
            .collect()
    }
}
