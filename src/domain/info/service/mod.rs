//! Info CRUD and validation logic

pub mod info_llm_service;
