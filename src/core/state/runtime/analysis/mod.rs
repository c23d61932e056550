pub mod analysis_session_repository;
pub mod analysis_session_repository_trait;
pub mod analysis_session_state;
