use std::path::PathBuf;

/// Root directory for persisted configuration, overridable via
/// `APISCOPE_DATA_DIR`.
pub fn data_dir() -> PathBuf {
    std::env::var("APISCOPE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"))
}

pub fn info_llm_path() -> PathBuf {
    data_dir().join("info").join("llm.rci")
}
