use thiserror::Error;

/// Errors raised while estimating or planning pages for a query.
#[derive(Debug, Error)]
pub enum PagingError {
    /// The requested page size was zero or negative.
    #[error("Invalid page size: {0} (must be greater than zero)")]
    InvalidPageSize(i64),

    /// The log service reported a negative match count.
    #[error("Invalid total results: {0} (must not be negative)")]
    NegativeTotal(i64),

    #[error("Page {page} is out of range (1..={pages})")]
    PageOutOfRange { page: i64, pages: u64 },

    #[error("Invalid paging configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to deserialize paging configuration: {0}")]
    ConfigDeserialize(#[from] serde_json::Error),

    /// The query text could not be split into pipeline stages.
    #[error("Failed to split query: {0}")]
    QuerySyntax(String),
}
