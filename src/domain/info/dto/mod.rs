pub mod info_llm_upsert_request;
