use crate::error::PagingError;
use serde::{Deserialize, Serialize};

/// Maximum number of entries the log service returns for a single query,
/// however many records actually match.
pub const MAX_RESULT_WINDOW: u64 = 5000;

pub const ENV_MAX_RESULT_WINDOW: &str = "SLS_MAX_RESULT_WINDOW";
pub const ENV_AGGREGATE_FUNCTIONS: &str = "SLS_AGGREGATE_FUNCTIONS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Ceiling applied to the reported total before paging.
    pub max_result_window: u64,

    /// Extra function names that reduce an analytic stage to a single row.
    pub aggregate_functions: Vec<String>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            max_result_window: MAX_RESULT_WINDOW,
            aggregate_functions: Vec::new(),
        }
    }
}

impl PagingConfig {
    pub fn from_json(s: &str) -> Result<Self, PagingError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `SLS_MAX_RESULT_WINDOW` and `SLS_AGGREGATE_FUNCTIONS`.
    pub fn from_env() -> Result<Self, PagingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, PagingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAX_RESULT_WINDOW) {
            config.max_result_window = raw.trim().parse().map_err(|_| {
                PagingError::InvalidConfig(format!(
                    "{ENV_MAX_RESULT_WINDOW} must be a positive integer, got '{raw}'"
                ))
            })?;
        }

        if let Some(raw) = lookup(ENV_AGGREGATE_FUNCTIONS) {
            config.aggregate_functions = raw
                .split(',')
                .map(|name| name.trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PagingError> {
        if self.max_result_window == 0 {
            return Err(PagingError::InvalidConfig(
                "max_result_window must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
