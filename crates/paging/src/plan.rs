use crate::{
    error::PagingError,
    estimator::{PageEstimate, PageEstimator, QueryKind},
};
use model::{pagination::page_request::PageRequest, query::descriptor::QueryDescriptor};

/// The fetches a paging loop issues to retrieve every result of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    kind: QueryKind,
    pages: u64,
    page_size: u64,
    effective_total: u64,
}

impl PagePlan {
    pub fn from_estimate(estimate: &PageEstimate) -> Self {
        Self {
            kind: estimate.kind,
            pages: estimate.pages,
            page_size: estimate.page_size,
            effective_total: estimate.effective_total,
        }
    }

    pub fn pages(&self) -> u64 {
        self.pages
    }

    pub fn requests(&self) -> impl Iterator<Item = PageRequest> + '_ {
        (1..=self.pages).map(move |page| self.build(page))
    }

    /// Request for a 1-based page number.
    pub fn request(&self, page: i64) -> Result<PageRequest, PagingError> {
        match u64::try_from(page) {
            Ok(p) if (1..=self.pages).contains(&p) => Ok(self.build(p)),
            _ => Err(PagingError::PageOutOfRange {
                page,
                pages: self.pages,
            }),
        }
    }

    fn build(&self, page: u64) -> PageRequest {
        let offset = (page - 1) * self.page_size;

        let lines = match self.kind {
            QueryKind::Aggregation => self.page_size,
            QueryKind::Search => match self.effective_total.saturating_sub(offset) {
                // empty result set still asks for one entry
                0 => self.page_size,
                remaining => remaining.min(self.page_size),
            },
        };

        PageRequest {
            page,
            offset,
            lines,
        }
    }
}

/// Estimates `desc` and resolves its `current_page` to a single request.
pub fn plan_current_page(
    estimator: &PageEstimator,
    desc: &mut QueryDescriptor,
) -> Result<PageRequest, PagingError> {
    let estimate = estimator.estimate(desc)?;
    PagePlan::from_estimate(&estimate).request(desc.current_page)
}
