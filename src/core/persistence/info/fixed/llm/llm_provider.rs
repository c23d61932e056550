use serde::{Deserialize, Serialize};

/// Supported narrative providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    /// Azure OpenAI deployments (`api-key` header, versioned URL).
    #[serde(rename = "azure")]
    AzureOpenAi,
    /// Any OpenAI-compatible `chat/completions` endpoint (bearer token).
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "huggingface")]
    HuggingFace,
}

impl LlmProvider {
    pub fn as_code(&self) -> &'static str {
        match self {
            LlmProvider::AzureOpenAi => "AZURE",
            LlmProvider::OpenAi => "OPENAI",
            LlmProvider::HuggingFace => "HUGGINGFACE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "AZURE" | "AZURE_OPENAI" => Some(LlmProvider::AzureOpenAi),
            "OPENAI" | "GPT" => Some(LlmProvider::OpenAi),
            "HUGGINGFACE" | "HF" => Some(LlmProvider::HuggingFace),
            _ => None,
        }
    }
}
