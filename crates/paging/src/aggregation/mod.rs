use crate::{
    aggregation::rules::UngroupedAggregateSelect,
    config::PagingConfig,
    query::{QueryPipeline, split_pipeline},
};
use std::fmt;
use tracing::{debug, warn};

pub mod rules;

/// A pattern that marks a query as reducing its matches to a single row.
pub trait AggregationRule: Send + Sync {
    fn name(&self) -> &str;

    fn matches(&self, pipeline: &QueryPipeline) -> bool;
}

/// Classifies query text as an aggregation or a plain search.
///
/// A query is an aggregation when any registered rule matches. Queries
/// without an analytic stage are always plain searches.
pub struct AggregationDetector {
    rules: Vec<Box<dyn AggregationRule>>,
}

impl AggregationDetector {
    /// A detector with no rules; every query is a plain search.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_config(config: &PagingConfig) -> Self {
        let select = UngroupedAggregateSelect::new()
            .with_functions(config.aggregate_functions.iter().cloned());
        Self::empty().with_rule(Box::new(select))
    }

    pub fn with_rule(mut self, rule: Box<dyn AggregationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn is_aggregation(&self, query: &str) -> bool {
        let pipeline = match split_pipeline(query) {
            Ok(pipeline) => pipeline,
            Err(err) => {
                warn!("Treating query as a plain search: {}", err);
                return false;
            }
        };

        if pipeline.is_search_only() {
            return false;
        }

        match self.rules.iter().find(|rule| rule.matches(&pipeline)) {
            Some(rule) => {
                debug!("Query classified as aggregation by rule '{}'", rule.name());
                true
            }
            None => false,
        }
    }
}

impl Default for AggregationDetector {
    fn default() -> Self {
        Self::with_config(&PagingConfig::default())
    }
}

impl fmt::Debug for AggregationDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregationDetector")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HistogramStage;

    impl AggregationRule for HistogramStage {
        fn name(&self) -> &str {
            "histogram_stage"
        }

        fn matches(&self, pipeline: &QueryPipeline) -> bool {
            pipeline
                .first_stage()
                .is_some_and(|s| s.leading_keyword() == Some("histogram"))
        }
    }

    #[test]
    fn test_default_detects_count() {
        let detector = AggregationDetector::default();
        assert!(detector.is_aggregation("*|select count(1) as count"));
        assert!(!detector.is_aggregation("*"));
    }

    #[test]
    fn test_empty_detector_never_matches() {
        let detector = AggregationDetector::empty();
        assert!(!detector.is_aggregation("*|select count(1) as count"));
        assert!(detector.rule_names().is_empty());
    }

    #[test]
    fn test_custom_rule_extends_detection() {
        let detector = AggregationDetector::default().with_rule(Box::new(HistogramStage));
        assert!(detector.is_aggregation("* | histogram 5m"));
        assert_eq!(
            detector.rule_names(),
            vec!["ungrouped_aggregate_select", "histogram_stage"]
        );
    }

    #[test]
    fn test_configured_function_is_aggregate() {
        let config = PagingConfig {
            aggregate_functions: vec!["checksum".to_string()],
            ..Default::default()
        };
        let detector = AggregationDetector::with_config(&config);
        assert!(detector.is_aggregation("* | select checksum(body)"));
        assert!(!AggregationDetector::default().is_aggregation("* | select checksum(body)"));
    }
}
