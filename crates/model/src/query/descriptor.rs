use serde::{Deserialize, Serialize};

/// A single log-search query as submitted by the dashboard host.
///
/// Integer fields are signed so that out-of-contract values coming from the
/// host (e.g. a negative total) survive deserialization and can be rejected
/// by the estimator with a proper error.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryDescriptor {
    pub query_type: String,
    pub query_mode: String,

    /// Raw query expression, e.g. `* and level: ERROR | select count(1)`.
    pub query: String,

    pub xcol: String, // chart x column
    pub ycol: String, // chart y column

    /// Requested number of log entries per page. May be lowered by the estimator.
    pub logs_per_page: i64,

    /// 1-based page the caller currently wants.
    pub current_page: i64,

    /// Total number of matches last reported by the log service.
    pub total_results: i64,
}

impl QueryDescriptor {
    pub fn new(query: impl Into<String>, logs_per_page: i64, total_results: i64) -> Self {
        Self {
            query: query.into(),
            logs_per_page,
            current_page: 1,
            total_results,
            ..Default::default()
        }
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Returns a copy with a fresh total, as reported by the next poll.
    pub fn with_total_results(mut self, total_results: i64) -> Self {
        self.total_results = total_results;
        self
    }
}
