use std::{
    fs::{self, File},
    io::{BufRead, BufReader},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::core::persistence::info::fixed::info_fixed_fs_adapter_trait::InfoFixedFsAdapterTrait;
use crate::core::persistence::storage_path::info_llm_path;

use super::info_llm_entity::InfoLlmEntity;
use super::llm_provider::LlmProvider;

/// FS adapter for persisted LLM configuration.
///
/// Uses a simple key-value `llm.rci` file with atomic writes. When no file
/// exists yet, reads fall back to the environment bootstrap.
pub struct InfoLlmFsAdapter;

impl InfoFixedFsAdapterTrait<InfoLlmEntity> for InfoLlmFsAdapter {
    fn new() -> Self
    where
        Self: Sized,
    {
        Self {}
    }

    fn read(&self) -> Result<InfoLlmEntity> {
        let path = info_llm_path();
        if !path.exists() {
            return Ok(InfoLlmEntity::from_env());
        }

        let file = File::open(&path).context("Failed to open llm file")?;
        let reader = BufReader::new(file);
        let mut s = InfoLlmEntity::default();

        for line in reader.lines() {
            let line = line?;
            if let Some((key, val)) = line.split_once(':') {
                let key = key.trim().to_uppercase();
                let val = val.trim();

                match key.as_str() {
                    "PROVIDER" => {
                        if let Some(p) = LlmProvider::from_code(val) {
                            s.provider = p;
                        }
                    }
                    "BASE_URL" => {
                        s.base_url = if val.is_empty() { None } else { Some(val.to_string()) }
                    }
                    "TOKEN" => {
                        s.token = if val.is_empty() { None } else { Some(val.to_string()) }
                    }
                    "MODEL" => {
                        s.model = if val.is_empty() { None } else { Some(val.to_string()) }
                    }
                    "API_VERSION" => {
                        s.api_version = if val.is_empty() { None } else { Some(val.to_string()) }
                    }
                    "MAX_OUTPUT_TOKENS" => s.max_output_tokens = val.parse().ok(),
                    "TEMPERATURE" => s.temperature = val.parse().ok(),
                    "TIMEOUT_MS" => s.timeout_ms = val.parse().ok(),
                    "CREATED_AT" => {
                        if let Ok(dt) = val.parse::<DateTime<Utc>>() {
                            s.created_at = dt;
                        }
                    }
                    "UPDATED_AT" => {
                        if let Ok(dt) = val.parse::<DateTime<Utc>>() {
                            s.updated_at = dt;
                        }
                    }
                    "VERSION" => s.version = val.to_string(),
                    _ => {}
                }
            }
        }

        Ok(s)
    }

    fn insert(&self, data: &InfoLlmEntity) -> Result<()> {
        self.write(data)
    }

    fn update(&self, data: &InfoLlmEntity) -> Result<()> {
        self.write(data)
    }

    fn delete(&self) -> Result<()> {
        let path = info_llm_path();
        if path.exists() {
            fs::remove_file(&path).context("Failed to delete llm file")?;
        }
        Ok(())
    }
}

impl InfoLlmFsAdapter {
    fn write(&self, data: &InfoLlmEntity) -> Result<()> {
        use std::io::Write;

        let path = info_llm_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create llm directory")?;
        }

        let tmp_path = path.with_extension("rci.tmp");
        let mut f = File::create(&tmp_path).context("Failed to create temp llm file")?;

        writeln!(f, "PROVIDER:{}", data.provider.as_code())?;
        writeln!(f, "BASE_URL:{}", data.base_url.clone().unwrap_or_default())?;
        writeln!(f, "TOKEN:{}", data.token.clone().unwrap_or_default())?;
        writeln!(f, "MODEL:{}", data.model.clone().unwrap_or_default())?;
        writeln!(f, "API_VERSION:{}", data.api_version.clone().unwrap_or_default())?;
        if let Some(v) = data.max_output_tokens {
            writeln!(f, "MAX_OUTPUT_TOKENS:{}", v)?;
        }
        if let Some(v) = data.temperature {
            writeln!(f, "TEMPERATURE:{}", v)?;
        }
        if let Some(v) = data.timeout_ms {
            writeln!(f, "TIMEOUT_MS:{}", v)?;
        }
        writeln!(f, "CREATED_AT:{}", data.created_at.to_rfc3339())?;
        writeln!(f, "UPDATED_AT:{}", data.updated_at.to_rfc3339())?;
        writeln!(f, "VERSION:{}", data.version)?;

        f.flush()?;
        f.sync_all().context("Failed to sync temp llm file")?;
        fs::rename(&tmp_path, &path).context("Failed to finalize llm file")?;

        Ok(())
    }
}
