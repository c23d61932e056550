use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::info::dto::info_llm_upsert_request::InfoLlmUpsertRequest;

use super::llm_provider::LlmProvider;

/// Configuration for outbound narrative calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoLlmEntity {
    /// Target provider.
    pub provider: LlmProvider,
    /// Base URL (Azure endpoint or an OpenAI-compatible root).
    pub base_url: Option<String>,
    /// Secret token or API key.
    pub token: Option<String>,
    /// Model identifier, or deployment name for Azure.
    pub model: Option<String>,
    /// API version query parameter (Azure only).
    pub api_version: Option<String>,
    /// Upper bound on response tokens; tightens each request's own cap.
    pub max_output_tokens: Option<u32>,
    /// Temperature for sampling (0-2).
    pub temperature: Option<f32>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Configuration creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Last update timestamp (UTC).
    pub updated_at: DateTime<Utc>,
    /// Version identifier for the configuration format.
    pub version: String,
}

impl Default for InfoLlmEntity {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            provider: LlmProvider::AzureOpenAi,
            base_url: None,
            token: None,
            model: None,
            api_version: None,
            max_output_tokens: None,
            temperature: Some(0.2),
            timeout_ms: Some(60_000),
            created_at: now,
            updated_at: now,
            version: "1.0.0".into(),
        }
    }
}

impl InfoLlmEntity {
    /// First-run bootstrap from environment variables, used when no
    /// configuration file exists yet. Recognizes the `LLM_*` names and the
    /// conventional `AZURE_OPENAI_*` ones.
    pub fn from_env() -> Self {
        let mut entity = Self::default();

        let env = |name: &str| std::env::var(name).ok().and_then(normalize_string);

        if let Some(p) = env("LLM_PROVIDER").and_then(|v| LlmProvider::from_code(&v)) {
            entity.provider = p;
        }
        entity.base_url = env("LLM_BASE_URL").or_else(|| env("AZURE_OPENAI_ENDPOINT"));
        entity.token = env("LLM_TOKEN").or_else(|| env("AZURE_OPENAI_API_KEY"));
        entity.model = env("LLM_MODEL").or_else(|| env("AZURE_OPENAI_DEPLOYMENT"));
        entity.api_version = env("LLM_API_VERSION").or_else(|| env("AZURE_OPENAI_API_VERSION"));
        entity
    }

    pub fn apply_update(&mut self, req: InfoLlmUpsertRequest) {
        if let Some(v) = req.provider {
            self.provider = v;
        }
        if let Some(v) = req.base_url {
            self.base_url = normalize_string(v);
        }
        if let Some(v) = req.token {
            self.token = normalize_string(v);
        }
        if let Some(v) = req.model {
            self.model = normalize_string(v);
        }
        if let Some(v) = req.api_version {
            self.api_version = normalize_string(v);
        }
        if let Some(v) = req.max_output_tokens {
            self.max_output_tokens = Some(v);
        }
        if let Some(v) = req.temperature {
            self.temperature = Some(v);
        }
        if let Some(v) = req.timeout_ms {
            self.timeout_ms = Some(v);
        }
        self.updated_at = Utc::now();
    }

    /// Mask the token for safe display (keeps last 4 chars).
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_ref().map(|t| {
            if t.chars().count() <= 8 {
                "***".into()
            } else {
                let tail: String = t
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("***{}", tail)
            }
        })
    }
}

fn normalize_string(v: String) -> Option<String> {
    let s = v.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_token_keeps_only_the_tail() {
        let mut entity = InfoLlmEntity::default();
        assert_eq!(entity.masked_token(), None);

        entity.token = Some("short".into());
        assert_eq!(entity.masked_token().as_deref(), Some("***"));

        entity.token = Some("sk-abcdef123456".into());
        assert_eq!(entity.masked_token().as_deref(), Some("***3456"));
    }

    #[test]
    fn masked_token_survives_multibyte_tokens() {
        let mut entity = InfoLlmEntity::default();
        entity.token = Some("пароль-секрет".into());
        assert_eq!(entity.masked_token().as_deref(), Some("***крет"));

        entity.token = Some("秘密".into());
        assert_eq!(entity.masked_token().as_deref(), Some("***"));
    }

    #[test]
    fn apply_update_normalizes_blank_strings() {
        let mut entity = InfoLlmEntity::default();
        entity.token = Some("old".into());

        let req: InfoLlmUpsertRequest = serde_json::from_value(serde_json::json!({
            "token": "   ",
            "model": " gpt-4o ",
        }))
        .unwrap();
        entity.apply_update(req);

        assert_eq!(entity.token, None);
        assert_eq!(entity.model.as_deref(), Some("gpt-4o"));
    }
}
