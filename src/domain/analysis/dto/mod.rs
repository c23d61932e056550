pub mod analysis_request;
pub mod analysis_result_dto;
