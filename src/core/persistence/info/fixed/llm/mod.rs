pub mod info_llm_api_repository_trait;
pub mod info_llm_entity;
pub mod info_llm_fs_adapter;
pub mod info_llm_repository;
pub mod llm_provider;
