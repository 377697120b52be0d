use model::{pagination::page_request::PageRequest, query::descriptor::QueryDescriptor};
use paging::{PageEstimator, PagePlan, PagingConfig, PagingError, plan_current_page};

#[test]
fn test_paging_loop_fetches_every_result_once() {
    let mut desc = QueryDescriptor::new("*", 30, 1000);
    let estimate = PageEstimator::default().estimate(&mut desc).unwrap();
    let plan = PagePlan::from_estimate(&estimate);

    let mut next_offset = 0;
    for request in plan.requests() {
        assert_eq!(request.offset, next_offset);
        assert!(request.lines <= desc.logs_per_page as u64);
        next_offset = request.end();
    }
    assert_eq!(next_offset, 1000);
    assert_eq!(plan.pages(), 34);
}

#[test]
fn test_current_page_with_custom_window() {
    let estimator = PageEstimator::new(PagingConfig {
        max_result_window: 95,
        ..Default::default()
    })
    .unwrap();

    let mut desc = QueryDescriptor::new("*", 10, 500);
    desc.current_page = 10;
    let request = plan_current_page(&estimator, &mut desc).unwrap();
    assert_eq!(
        request,
        PageRequest {
            page: 10,
            offset: 90,
            lines: 5
        }
    );

    desc.current_page = 11;
    assert!(matches!(
        plan_current_page(&estimator, &mut desc),
        Err(PagingError::PageOutOfRange { page: 11, pages: 10 })
    ));
}

#[test]
fn test_current_page_after_shrink() {
    let mut desc = QueryDescriptor::new("*", 50, 12);
    let request = plan_current_page(&PageEstimator::default(), &mut desc).unwrap();
    assert_eq!(desc.logs_per_page, 12);
    assert_eq!(request.to_string(), "page 1 (offset=0, lines=12)");
}
