use crate::{aggregation::AggregationRule, query::QueryPipeline};
use std::collections::HashSet;

/// Functions that collapse all input rows into one value.
pub const AGGREGATE_FUNCTIONS: &[&str] = &[
    "count",
    "count_if",
    "sum",
    "avg",
    "min",
    "max",
    "min_by",
    "max_by",
    "arbitrary",
    "approx_distinct",
    "approx_percentile",
    "stddev",
    "variance",
    "histogram",
    "map_agg",
    "array_agg",
];

const PROJECTION_END: &[&str] = &["from", "where", "group", "having", "order", "limit"];

/// `select <aggregate>(...) ...` with no top-level `group by` and no window (`over`).
/// Subqueries in brackets may group freely.
///
/// `*|select count(1) as count` matches; `*|select host, count(1) group by host`
/// does not, since it returns one row per group.
pub struct UngroupedAggregateSelect {
    functions: HashSet<String>,
}

impl UngroupedAggregateSelect {
    pub fn new() -> Self {
        Self {
            functions: AGGREGATE_FUNCTIONS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn with_functions<I>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.functions
            .extend(names.into_iter().map(|n| n.to_lowercase()));
        self
    }
}

impl Default for UngroupedAggregateSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregationRule for UngroupedAggregateSelect {
    fn name(&self) -> &str {
        "ungrouped_aggregate_select"
    }

    fn matches(&self, pipeline: &QueryPipeline) -> bool {
        let Some(stage) = pipeline.first_stage() else {
            return false;
        };

        if stage.leading_keyword() != Some("select") {
            return false;
        }

        if stage.contains_top_level_phrase(&["group", "by"])
            || stage.contains_top_level_word("over")
        {
            return false;
        }

        stage
            .clause("select", PROJECTION_END)
            .iter()
            .any(|w| w.is_call && self.functions.contains(&w.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::split_pipeline;

    fn matches(query: &str) -> bool {
        let pipeline = split_pipeline(query).unwrap();
        UngroupedAggregateSelect::new().matches(&pipeline)
    }

    #[test]
    fn test_count_select() {
        assert!(matches("*|select count(1) as count"));
        assert!(matches("status: 500 | SELECT COUNT(*) AS errors"));
        assert!(matches("* | select avg(latency), max(latency) from log where latency > 10"));
    }

    #[test]
    fn test_grouped_select_is_not_single_row() {
        assert!(!matches("* | select host, count(1) as c group by host"));
        assert!(!matches("* | select count(1) over (partition by host) as c"));
    }

    #[test]
    fn test_grouped_subquery_still_single_row() {
        assert!(matches(
            "* | select count(1) from (select host from log group by host)"
        ));
        assert!(matches(
            "* | select avg(c) from (select host, count(1) as c from log group by host) limit 1"
        ));
        assert!(!matches(
            "* | select host, count(1) from (select host from log) group by host"
        ));
    }

    #[test]
    fn test_collection_aggregates() {
        assert!(matches("*|select histogram(status)"));
        assert!(matches("* | select map_agg(host, latency)"));
        assert!(matches("* | select array_agg(host) as hosts"));
        assert!(!matches("* | select histogram(status) group by host"));
    }

    #[test]
    fn test_non_aggregate_select() {
        assert!(!matches("* | select host, status limit 100"));
        // `count` as a plain column is not a call
        assert!(!matches("* | select count, host"));
    }

    #[test]
    fn test_aggregate_outside_projection() {
        assert!(!matches("* | select host from log order by count(1)"));
    }

    #[test]
    fn test_search_only_and_non_select_stage() {
        assert!(!matches("count(1)"));
        assert!(!matches("* | where count(x) > 1"));
    }

    #[test]
    fn test_quoted_function_name_is_ignored() {
        assert!(!matches(r#"* | select "count(1)" as literal"#));
    }
}
