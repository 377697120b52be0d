pub mod page_request;
