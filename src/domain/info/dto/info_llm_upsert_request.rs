use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::persistence::info::fixed::llm::llm_provider::LlmProvider;

/// Partial update of the LLM settings; absent fields keep their value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InfoLlmUpsertRequest {
    pub provider: Option<LlmProvider>,
    #[validate(url)]
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub model: Option<String>,
    pub api_version: Option<String>,
    #[validate(range(min = 1, max = 32768))]
    pub max_output_tokens: Option<u32>,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: Option<f32>,
    #[validate(range(min = 100))]
    pub timeout_ms: Option<u64>,
}
