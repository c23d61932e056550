use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::core::persistence::info::fixed::llm::info_llm_api_repository_trait::InfoLlmApiRepository;
use crate::core::persistence::info::fixed::llm::info_llm_entity::InfoLlmEntity;
use crate::core::persistence::info::fixed::llm::info_llm_repository::InfoLlmRepository;
use crate::core::persistence::info::fixed::llm::llm_provider::LlmProvider;
use crate::errors::NarrativeError;

/// One narrative invocation: a fixed system message, the assembled user
/// prompt, and the response-token cap for this analysis kind.
#[derive(Debug, Clone)]
pub struct NarrativeRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}

/// Seam between the analysis boundary and the external text-generation
/// service; tests substitute a mock.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeError>;
}

/// Chat-completions client driven by the stored LLM settings.
#[derive(Default)]
pub struct LlmNarrativeClient;

impl LlmNarrativeClient {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NarrativeGenerator for LlmNarrativeClient {
    async fn generate(&self, request: &NarrativeRequest) -> Result<String, NarrativeError> {
        let cfg = InfoLlmRepository::new()
            .read()
            .map_err(|e| NarrativeError::Configuration(e.to_string()))?;
        call_chat_completions(&cfg, request).await
    }
}

async fn call_chat_completions(
    cfg: &InfoLlmEntity,
    request: &NarrativeRequest,
) -> Result<String, NarrativeError> {
    let token = cfg
        .token
        .clone()
        .ok_or_else(|| NarrativeError::Configuration("LLM token is missing; set it via /llm/settings".into()))?;
    let model = cfg
        .model
        .clone()
        .ok_or_else(|| NarrativeError::Configuration("Model is missing; set it via /llm/settings".into()))?;

    let url = completions_url(cfg, &model)?;

    let mut body = serde_json::json!({
        "model": model,
        "messages": [
            { "role": "system", "content": request.system },
            { "role": "user", "content": request.prompt },
        ],
        "max_tokens": response_token_cap(cfg, request),
    });
    if let Some(v) = cfg.temperature {
        body["temperature"] = serde_json::json!(v);
    }

    let timeout = Duration::from_millis(cfg.timeout_ms.unwrap_or(60_000));
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| NarrativeError::Transport(format!("Failed to build HTTP client: {}", e)))?;

    let mut req = client.post(&url).json(&body);
    req = match cfg.provider {
        // Azure authenticates with an api-key header, not a bearer token.
        LlmProvider::AzureOpenAi => req.header("api-key", token),
        LlmProvider::OpenAi | LlmProvider::HuggingFace => req.bearer_auth(token),
    };

    let resp = req
        .send()
        .await
        .map_err(|e| NarrativeError::Transport(format!("Failed to call {}: {}", url, e)))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(NarrativeError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    let json: Value = resp
        .json()
        .await
        .map_err(|e| NarrativeError::MalformedResponse(e.to_string()))?;
    extract_content(&json)
}

/// The per-kind request cap, tightened by the configured output limit.
fn response_token_cap(cfg: &InfoLlmEntity, request: &NarrativeRequest) -> u32 {
    cfg.max_output_tokens
        .map_or(request.max_tokens, |limit| limit.min(request.max_tokens))
}

/// Azure uses the versioned deployment form; every other provider is an
/// OpenAI-compatible `{base}/chat/completions`.
fn completions_url(cfg: &InfoLlmEntity, model: &str) -> Result<String, NarrativeError> {
    let base_url = match cfg.provider {
        LlmProvider::HuggingFace => cfg
            .base_url
            .clone()
            .unwrap_or_else(|| "https://router.huggingface.co/v1".to_string()),
        _ => cfg.base_url.clone().ok_or_else(|| {
            NarrativeError::Configuration("Base URL is missing; set it via /llm/settings".into())
        })?,
    };
    let trimmed = base_url.trim_end_matches('/');

    match cfg.provider {
        LlmProvider::AzureOpenAi => {
            let api_version = cfg.api_version.clone().ok_or_else(|| {
                NarrativeError::Configuration(
                    "API version is missing; Azure requires api_version".into(),
                )
            })?;
            Ok(format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                trimmed, model, api_version
            ))
        }
        LlmProvider::OpenAi | LlmProvider::HuggingFace => {
            if trimmed.ends_with("/chat/completions") {
                Ok(trimmed.to_string())
            } else {
                Ok(format!("{}/chat/completions", trimmed))
            }
        }
    }
}

fn extract_content(json: &Value) -> Result<String, NarrativeError> {
    json.pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            NarrativeError::MalformedResponse(
                "response has no choices[0].message.content".into(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn azure_cfg() -> InfoLlmEntity {
        InfoLlmEntity {
            provider: LlmProvider::AzureOpenAi,
            base_url: Some("https://example.openai.azure.com/".into()),
            api_version: Some("2024-02-01".into()),
            ..InfoLlmEntity::default()
        }
    }

    #[test]
    fn azure_url_uses_deployment_form() {
        let url = completions_url(&azure_cfg(), "gpt-4o-telemetry").unwrap();
        assert_eq!(
            url,
            "https://example.openai.azure.com/openai/deployments/gpt-4o-telemetry/chat/completions?api-version=2024-02-01"
        );
    }

    #[test]
    fn azure_without_api_version_is_a_configuration_error() {
        let mut cfg = azure_cfg();
        cfg.api_version = None;
        let err = completions_url(&cfg, "gpt-4o").unwrap_err();
        assert_eq!(err.kind_label(), "configuration");
    }

    #[test]
    fn openai_url_appends_chat_completions_once() {
        let cfg = InfoLlmEntity {
            provider: LlmProvider::OpenAi,
            base_url: Some("https://api.openai.com/v1".into()),
            ..InfoLlmEntity::default()
        };
        assert_eq!(
            completions_url(&cfg, "gpt-4o").unwrap(),
            "https://api.openai.com/v1/chat/completions"
        );

        let cfg = InfoLlmEntity {
            base_url: Some("https://api.openai.com/v1/chat/completions".into()),
            ..cfg
        };
        assert_eq!(
            completions_url(&cfg, "gpt-4o").unwrap(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn configured_output_limit_tightens_the_request_cap() {
        let request = NarrativeRequest {
            system: "s".into(),
            prompt: "p".into(),
            max_tokens: 1500,
        };

        let mut cfg = InfoLlmEntity::default();
        cfg.max_output_tokens = None;
        assert_eq!(response_token_cap(&cfg, &request), 1500);

        cfg.max_output_tokens = Some(512);
        assert_eq!(response_token_cap(&cfg, &request), 512);

        // A generous setting never loosens the per-kind cap.
        cfg.max_output_tokens = Some(8192);
        assert_eq!(response_token_cap(&cfg, &request), 1500);
    }

    #[test]
    fn content_extraction_rejects_other_shapes() {
        let ok = serde_json::json!({
            "choices": [{ "message": { "content": "All clear." } }]
        });
        assert_eq!(extract_content(&ok).unwrap(), "All clear.");

        let missing = serde_json::json!({ "choices": [] });
        assert_eq!(
            extract_content(&missing).unwrap_err().kind_label(),
            "malformed-response"
        );
    }
}
