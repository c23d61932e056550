use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoadSourceRequest {
    /// Path to a `.csv`/`.tsv`/`.xlsx`/`.xls` telemetry source.
    #[validate(length(min = 1))]
    pub path: String,
}
