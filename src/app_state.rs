use std::sync::Arc;

use crate::core::state::runtime::analysis::analysis_session_repository::AnalysisSessionRepository;
use crate::core::state::runtime::analysis::analysis_session_state::AnalysisSessionState;
use crate::core::state::runtime::dataset::dataset_state_repository::DatasetStateRepository;
use crate::domain::analysis::dto::analysis_request::{
    ErrorSpreadAnalysisRequest, PeriodComparisonAnalysisRequest,
};
use crate::domain::analysis::dto::analysis_result_dto::AnalysisResultDto;
use crate::domain::analysis::service::analysis_service;
use crate::domain::llm::service::narrative_service::LlmNarrativeClient;
use crate::domain::telemetry::dto::comparison_request::{
    DailyComparisonRequest, ErrorCodeComparisonRequest, HourlySpreadRequest,
};
use crate::domain::telemetry::dto::comparison_response_dto::{
    DailyComparisonResponse, ErrorCodeComparisonResponse, HourlySpreadResponse,
};
use crate::domain::telemetry::dto::load_source_request::LoadSourceRequest;
use crate::domain::telemetry::dto::source_status_dto::{SourceDimensionsDto, SourceStatusDto};
use crate::domain::telemetry::service::{query_service, source_service};

macro_rules! delegate_async_service {
    ($(fn $name:ident($($arg:ident : $typ:ty),*) -> $ret:ty => $path:path;)+) => {
        $(
            pub async fn $name(&self, $($arg: $typ),*) -> anyhow::Result<$ret> {
                $path($($arg),*).await
            }
        )+
    };
}

#[derive(Clone)]
pub struct AppState {
    pub source_service: Arc<SourceService>,
    pub telemetry_service: Arc<TelemetryService>,
    pub analysis_service: Arc<AnalysisService>,
    pub llm_settings_service: Arc<LlmSettingsService>,
}

pub fn build_app_state() -> AppState {
    // One snapshot and one session store shared by every service.
    let dataset_repo = DatasetStateRepository::new().shared();
    let session_repo = AnalysisSessionRepository::new().shared();

    AppState {
        source_service: Arc::new(SourceService {
            dataset_repo: dataset_repo.clone(),
            session_repo: session_repo.clone(),
        }),
        telemetry_service: Arc::new(TelemetryService {
            dataset_repo: dataset_repo.clone(),
        }),
        analysis_service: Arc::new(AnalysisService {
            dataset_repo,
            session_repo,
            generator: LlmNarrativeClient::new(),
        }),
        llm_settings_service: Arc::new(LlmSettingsService),
    }
}

pub struct SourceService {
    dataset_repo: Arc<DatasetStateRepository>,
    session_repo: Arc<AnalysisSessionRepository>,
}

impl SourceService {
    pub async fn load_source(&self, req: LoadSourceRequest) -> anyhow::Result<SourceStatusDto> {
        source_service::load_source(self.dataset_repo.as_ref(), self.session_repo.as_ref(), req)
            .await
    }

    pub async fn source_status(&self) -> anyhow::Result<SourceStatusDto> {
        source_service::source_status(self.dataset_repo.as_ref()).await
    }

    pub async fn source_dimensions(&self) -> anyhow::Result<SourceDimensionsDto> {
        source_service::source_dimensions(self.dataset_repo.as_ref()).await
    }
}

pub struct TelemetryService {
    dataset_repo: Arc<DatasetStateRepository>,
}

impl TelemetryService {
    pub async fn daily_comparison(
        &self,
        req: DailyComparisonRequest,
    ) -> anyhow::Result<DailyComparisonResponse> {
        query_service::daily_comparison(self.dataset_repo.as_ref(), req).await
    }

    pub async fn error_code_comparison(
        &self,
        req: ErrorCodeComparisonRequest,
    ) -> anyhow::Result<ErrorCodeComparisonResponse> {
        query_service::error_code_comparison(self.dataset_repo.as_ref(), req).await
    }

    pub async fn hourly_spread(
        &self,
        req: HourlySpreadRequest,
    ) -> anyhow::Result<HourlySpreadResponse> {
        query_service::hourly_spread(self.dataset_repo.as_ref(), req).await
    }
}

pub struct AnalysisService {
    dataset_repo: Arc<DatasetStateRepository>,
    session_repo: Arc<AnalysisSessionRepository>,
    generator: LlmNarrativeClient,
}

impl AnalysisService {
    pub async fn analyze_period_comparison(
        &self,
        req: PeriodComparisonAnalysisRequest,
    ) -> anyhow::Result<AnalysisResultDto> {
        analysis_service::analyze_period_comparison_with(
            self.dataset_repo.as_ref(),
            self.session_repo.as_ref(),
            &self.generator,
            req,
        )
        .await
    }

    pub async fn analyze_error_spread(
        &self,
        req: ErrorSpreadAnalysisRequest,
    ) -> anyhow::Result<AnalysisResultDto> {
        analysis_service::analyze_error_spread_with(
            self.dataset_repo.as_ref(),
            self.session_repo.as_ref(),
            &self.generator,
            req,
        )
        .await
    }

    pub async fn get_results(&self) -> anyhow::Result<AnalysisSessionState> {
        analysis_service::get_results(self.session_repo.as_ref()).await
    }

    pub async fn clear_results(&self) -> anyhow::Result<serde_json::Value> {
        analysis_service::clear_results(self.session_repo.as_ref()).await
    }
}

#[derive(Clone, Default)]
pub struct LlmSettingsService;

impl LlmSettingsService {
    delegate_async_service! {
        fn get_llm_settings() -> serde_json::Value => crate::domain::info::service::info_llm_service::get_info_llm;
        fn upsert_llm_settings(req: crate::domain::info::dto::info_llm_upsert_request::InfoLlmUpsertRequest) -> serde_json::Value => crate::domain::info::service::info_llm_service::upsert_info_llm;
    }
}
