pub mod dataset_state;
pub mod dataset_state_repository;
pub mod dataset_state_repository_trait;
