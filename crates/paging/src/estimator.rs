use crate::{aggregation::AggregationDetector, config::PagingConfig, error::PagingError};
use model::query::descriptor::QueryDescriptor;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueryKind {
    /// Reduces all matches to one computed row.
    Aggregation,
    /// Returns matching log entries, possibly over many pages.
    Search,
}

/// Outcome of a page-count estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageEstimate {
    pub pages: u64,
    /// Page size after normalization.
    pub page_size: u64,
    /// Reported total clamped to the result window.
    pub effective_total: u64,
    pub kind: QueryKind,
    /// The reported total exceeded the result window.
    pub capped: bool,
}

#[derive(Debug)]
pub struct PageEstimator {
    config: PagingConfig,
    detector: AggregationDetector,
}

impl PageEstimator {
    pub fn new(config: PagingConfig) -> Result<Self, PagingError> {
        config.validate()?;
        let detector = AggregationDetector::with_config(&config);
        Ok(Self { config, detector })
    }

    pub fn with_detector(mut self, detector: AggregationDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    pub fn page_count(&self, desc: &mut QueryDescriptor) -> Result<u64, PagingError> {
        Ok(self.estimate(desc)?.pages)
    }

    /// Estimates the number of pages needed to fetch every result of `desc`.
    ///
    /// When the effective total fits in a single page, `desc.logs_per_page` is
    /// lowered to that total (never below 1). On error `desc` is left untouched.
    pub fn estimate(&self, desc: &mut QueryDescriptor) -> Result<PageEstimate, PagingError> {
        if desc.logs_per_page <= 0 {
            return Err(PagingError::InvalidPageSize(desc.logs_per_page));
        }
        if desc.total_results < 0 {
            return Err(PagingError::NegativeTotal(desc.total_results));
        }

        let page_size = desc.logs_per_page as u64;
        let total = desc.total_results as u64;
        let window = self.config.max_result_window;
        let capped = total > window;
        let effective_total = total.min(window);

        if self.detector.is_aggregation(&desc.query) {
            debug!("Aggregation query '{}' needs a single page", desc.query);
            return Ok(PageEstimate {
                pages: 1,
                page_size,
                effective_total,
                kind: QueryKind::Aggregation,
                capped,
            });
        }

        if capped {
            warn!(
                "Reported total {} exceeds the result window, capping to {}",
                total, window
            );
        }

        if effective_total <= page_size {
            let normalized = effective_total.max(1);
            if normalized != page_size {
                debug!(
                    "Shrinking page size from {} to {} to fit {} results",
                    page_size, normalized, effective_total
                );
                desc.logs_per_page = normalized as i64;
            }
            return Ok(PageEstimate {
                pages: 1,
                page_size: normalized,
                effective_total,
                kind: QueryKind::Search,
                capped,
            });
        }

        let pages = effective_total.div_ceil(page_size);
        debug!(
            "{} results at {} per page need {} pages",
            effective_total, page_size, pages
        );

        Ok(PageEstimate {
            pages,
            page_size,
            effective_total,
            kind: QueryKind::Search,
            capped,
        })
    }
}

impl Default for PageEstimator {
    fn default() -> Self {
        let config = PagingConfig::default();
        let detector = AggregationDetector::with_config(&config);
        Self { config, detector }
    }
}

/// Page count for `desc` under the default result window.
pub fn compute_page_count(desc: &mut QueryDescriptor) -> Result<u64, PagingError> {
    PageEstimator::default().page_count(desc)
}
