pub mod create_list_request;
pub mod list_detail_response;
pub mod list_summary_response;
pub mod lists;
pub mod subscriber_dto;
