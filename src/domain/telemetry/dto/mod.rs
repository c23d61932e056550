pub mod comparison_request;
pub mod comparison_response_dto;
pub mod load_source_request;
pub mod source_status_dto;
