use serde::{Deserialize, Serialize};
use std::fmt;

/// One fetch unit sent to the log service.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u64,

    /// Number of entries to skip.
    pub offset: u64,

    /// Maximum number of entries to return (the service's `line` parameter).
    pub lines: u64,
}

impl PageRequest {
    /// Offset one past the last entry covered by this request.
    pub fn end(&self) -> u64 {
        self.offset + self.lines
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page {} (offset={}, lines={})",
            self.page, self.offset, self.lines
        )
    }
}
