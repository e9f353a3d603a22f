use std::collections::{BTreeMap, BTreeSet};

use regex::{Regex, RegexBuilder};

use crate::error::Result;
use crate::models::{FinancialMetrics, MetricCategory};

pub const MAX_SNIPPETS_PER_CATEGORY: usize = 3;

/// Regex-table extraction of revenue, user, growth and funding mentions.
pub struct FinancialMetricExtractor {
    patterns: Vec<(MetricCategory, Vec<Regex>)>,
}

impl FinancialMetricExtractor {
    pub fn new(table: &BTreeMap<MetricCategory, Vec<String>>) -> Result<Self> {
        let patterns = table
            .iter()
            .map(|(category, sources)| -> Result<(MetricCategory, Vec<Regex>)> {
                let compiled = sources
                    .iter()
                    .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok((*category, compiled))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Pooled, deduplicated matches per category, at most three each.
    /// Snippets are returned in lexicographic order.
    pub fn extract(&self, text: &str) -> FinancialMetrics {
        let mut metrics = FinancialMetrics::empty();

        for (category, regexes) in &self.patterns {
            let snippets: BTreeSet<String> = regexes
                .iter()
                .flat_map(|re| re.find_iter(text))
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();

            let snippets: Vec<String> = snippets
                .into_iter()
                .take(MAX_SNIPPETS_PER_CATEGORY)
                .collect();

            if !snippets.is_empty() {
                tracing::debug!("Found {} {} metric(s)", snippets.len(), category);
            }
            metrics.set(*category, snippets);
        }

        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rubric;

    fn extractor() -> FinancialMetricExtractor {
        FinancialMetricExtractor::new(&Rubric::embedded().unwrap().financial_patterns).unwrap()
    }

    #[test]
    fn test_empty_text_has_no_metrics() {
        let metrics = extractor().extract("");
        for category in MetricCategory::ALL {
            assert!(metrics.get(category).is_empty());
        }
        assert!(!metrics.any_found());
    }

    #[test]
    fn test_funding_mention() {
        let metrics = extractor().extract(
            "We have raised $2M in funding from top VCs. Our solution solves the biggest problem in logistics.",
        );
        assert_eq!(metrics.get(MetricCategory::Funding), ["raised $2M"]);
        assert!(metrics.get(MetricCategory::Revenue).is_empty());
        assert!(metrics.get(MetricCategory::Users).is_empty());
        assert!(metrics.get(MetricCategory::Growth).is_empty());
    }

    #[test]
    fn test_value_before_and_after_keyword() {
        let metrics = extractor().extract("2,500 users signed up. Growth of 15% each month.");
        assert_eq!(metrics.get(MetricCategory::Users), ["2,500 users"]);
        assert_eq!(metrics.get(MetricCategory::Growth), ["Growth of 15%"]);
    }

    #[test]
    fn test_decimal_figures_do_not_end_the_sentence() {
        let metrics = extractor().extract("Sales reached 1.5x plan at $3M this year.");
        assert_eq!(
            metrics.get(MetricCategory::Revenue),
            ["Sales reached 1.5x plan at $3M"]
        );
    }

    #[test]
    fn test_keyword_and_figure_in_different_sentences() {
        let metrics = extractor().extract("Our revenue is growing. We raised $2M in funding.");
        assert!(metrics.get(MetricCategory::Revenue).is_empty());
        assert_eq!(metrics.get(MetricCategory::Funding), ["raised $2M"]);
    }

    #[test]
    fn test_case_insensitive_revenue() {
        let metrics = extractor().extract("We booked $180K REVENUE last year.");
        let revenue = metrics.get(MetricCategory::Revenue);
        assert!(revenue.iter().any(|s| s == "$180K REVENUE"), "{:?}", revenue);
    }

    #[test]
    fn test_snippets_are_unique_and_capped() {
        let text = "10 users. 10 users. 20 users. 30 users. 40 users. 50 customers.";
        let metrics = extractor().extract(text);
        let users = metrics.get(MetricCategory::Users);
        assert_eq!(users.len(), MAX_SNIPPETS_PER_CATEGORY);
        let unique: BTreeSet<_> = users.iter().collect();
        assert_eq!(unique.len(), users.len());
    }

    #[test]
    fn test_custom_pattern_table() {
        let mut table = BTreeMap::new();
        table.insert(MetricCategory::Growth, vec![r"\d+x growth".to_string()]);
        let extractor = FinancialMetricExtractor::new(&table).unwrap();
        let metrics = extractor.extract("We saw 3x GROWTH.");
        assert_eq!(metrics.get(MetricCategory::Growth), ["3x GROWTH"]);
        assert!(metrics.get(MetricCategory::Funding).is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let mut table = BTreeMap::new();
        table.insert(MetricCategory::Revenue, vec!["(unclosed".to_string()]);
        assert!(FinancialMetricExtractor::new(&table).is_err());
    }
}
