use std::num::NonZeroUsize;

use lru::LruCache;
use sha2::{Digest, Sha256};

use crate::analysis::PitchAnalyzer;
use crate::models::{AnalysisReport, ScoringPolicy};

/// Memoizes reports by content hash in front of a [`PitchAnalyzer`].
///
/// Analysis is deterministic, so a cached report is identical to a fresh one.
pub struct AnalysisCache {
    analyzer: PitchAnalyzer,
    reports: LruCache<String, AnalysisReport>,
    hits: u64,
    misses: u64,
}

impl AnalysisCache {
    pub fn new(analyzer: PitchAnalyzer, capacity: usize) -> Self {
        Self {
            analyzer,
            reports: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            hits: 0,
            misses: 0,
        }
    }

    pub fn analyze(&mut self, text: &str, policy: ScoringPolicy) -> AnalysisReport {
        let key = cache_key(text, policy);

        if let Some(report) = self.reports.get(&key) {
            self.hits += 1;
            tracing::debug!("Cache hit for {}", &key[..12]);
            return report.clone();
        }

        self.misses += 1;
        let report = self.analyzer.analyze(text, policy);
        self.reports.put(key, report.clone());
        report
    }

    pub fn analyzer(&self) -> &PitchAnalyzer {
        &self.analyzer
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.reports.clear();
    }
}

/// SHA-256 hex digest of the policy name and text.
pub fn cache_key(text: &str, policy: ScoringPolicy) -> String {
    let mut hasher = Sha256::new();
    hasher.update(policy.as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::AnalyzerConfig;
    use crate::lexicon::Lexicon;
    use crate::models::Rubric;

    const PITCH: &str = "Our team solves a painful problem. We raised $2M in funding from top VCs.";

    fn cache(capacity: usize) -> AnalysisCache {
        let analyzer = PitchAnalyzer::with_lexicon(
            &Rubric::embedded().unwrap(),
            AnalyzerConfig::default(),
            Arc::new(Lexicon::embedded()),
        )
        .unwrap();
        AnalysisCache::new(analyzer, capacity)
    }

    #[test]
    fn test_cache_key_is_stable_hex() {
        let key = cache_key("pitch", ScoringPolicy::Basic);
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key, cache_key("pitch", ScoringPolicy::Basic));
        assert_ne!(key, cache_key("pitch", ScoringPolicy::Structural));
        assert_ne!(key, cache_key("pitch.", ScoringPolicy::Basic));
    }

    #[test]
    fn test_cached_report_matches_fresh_report() {
        let mut cache = cache(4);
        let fresh = cache.analyzer().comprehensive(PITCH);
        let first = cache.analyze(PITCH, ScoringPolicy::Structural);
        let second = cache.analyze(PITCH, ScoringPolicy::Structural);

        assert_eq!(first, fresh);
        assert_eq!(second, fresh);
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_policies_are_cached_separately() {
        let mut cache = cache(4);
        let basic = cache.analyze(PITCH, ScoringPolicy::Basic);
        let structural = cache.analyze(PITCH, ScoringPolicy::Structural);
        assert_eq!(basic.policy, ScoringPolicy::Basic);
        assert_eq!(structural.policy, ScoringPolicy::Structural);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats(), (0, 2));
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let mut cache = cache(1);
        cache.analyze("first pitch", ScoringPolicy::Basic);
        cache.analyze("second pitch", ScoringPolicy::Basic);
        cache.analyze("first pitch", ScoringPolicy::Basic);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), (0, 3));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_still_caches_one() {
        let mut cache = cache(0);
        cache.analyze(PITCH, ScoringPolicy::Basic);
        cache.analyze(PITCH, ScoringPolicy::Basic);
        assert_eq!(cache.stats(), (1, 1));
    }
}
