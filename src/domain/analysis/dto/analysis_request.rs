use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::core::state::runtime::analysis::analysis_session_state::PeriodSlot;
use crate::domain::telemetry::dto::comparison_request::PeriodDates;
use crate::domain::telemetry::model::criteria::FilterCriteria;

/// Inputs for the two-period narrative comparison. The optional chart
/// images are base64 PNGs rendered by the UI; the payload embeds only a
/// short preview of each.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PeriodComparisonAnalysisRequest {
    #[serde(default)]
    pub filters: FilterCriteria,
    pub period1: PeriodDates,
    pub period2: PeriodDates,
    #[validate(length(min = 1))]
    pub outcome: String,
    pub chart1_png_base64: Option<String>,
    pub chart2_png_base64: Option<String>,
}

/// Inputs for the hourly error-spread narrative of one code on one date.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ErrorSpreadAnalysisRequest {
    #[serde(default)]
    pub filters: FilterCriteria,
    pub period: PeriodDates,
    /// Which comparison side this drilldown belongs to; decides the
    /// session-store key (`p1_{code}` / `p2_{code}`).
    pub slot: PeriodSlot,
    pub date: NaiveDate,
    #[validate(length(min = 1))]
    pub error_code: String,
    #[validate(length(min = 1))]
    pub outcome: String,
}
