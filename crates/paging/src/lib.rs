//! Page-count estimation for log-search queries against an SLS logstore.
//!
//! The estimator decides how many `GetLogs` pages a caller has to fetch for a
//! query, given the page size it asked for and the total match count the
//! service reported on the previous poll.

pub mod aggregation;
pub mod config;
pub mod error;
pub mod estimator;
pub mod plan;
pub mod query;

pub use config::{MAX_RESULT_WINDOW, PagingConfig};
pub use error::PagingError;
pub use estimator::{PageEstimate, PageEstimator, QueryKind, compute_page_count};
pub use plan::{PagePlan, plan_current_page};
