use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use validator::Validate;

use crate::core::state::runtime::analysis::analysis_session_repository_trait::AnalysisSessionRepositoryTrait;
use crate::core::state::runtime::analysis::analysis_session_state::AnalysisSessionState;
use crate::core::state::runtime::dataset::dataset_state::DatasetState;
use crate::core::state::runtime::dataset::dataset_state_repository_trait::DatasetStateRepositoryTrait;
use crate::domain::telemetry::dto::load_source_request::LoadSourceRequest;
use crate::domain::telemetry::dto::source_status_dto::{SourceDimensionsDto, SourceStatusDto};
use crate::domain::telemetry::service::loader_service;
use crate::errors::TelemetryError;

/// Load (or replace) the dataset snapshot and clear the analysis store,
/// since stored narratives describe the previous dataset.
pub async fn load_source<D, A>(
    dataset_repo: &D,
    session_repo: &A,
    req: LoadSourceRequest,
) -> Result<SourceStatusDto>
where
    D: DatasetStateRepositoryTrait,
    A: AnalysisSessionRepositoryTrait,
{
    req.validate()?;
    let path = PathBuf::from(req.path);

    let records = loader_service::load_records(&path)?;
    let state = DatasetState::from_records(path, records);
    let status = SourceStatusDto::from(&state);

    info!(
        rows = status.rows,
        unparsable = status.unparsable_timestamps,
        source = status.source.as_deref().unwrap_or("<none>"),
        "telemetry source loaded"
    );

    dataset_repo.set(state).await;
    session_repo.set(AnalysisSessionState::default()).await;
    Ok(status)
}

pub async fn source_status<D: DatasetStateRepositoryTrait>(
    dataset_repo: &D,
) -> Result<SourceStatusDto> {
    let snapshot = dataset_repo.get().await;
    Ok(SourceStatusDto::from(snapshot.as_ref()))
}

pub async fn source_dimensions<D: DatasetStateRepositoryTrait>(
    dataset_repo: &D,
) -> Result<SourceDimensionsDto> {
    let snapshot = dataset_repo.get().await;
    if !snapshot.is_loaded() {
        return Err(TelemetryError::SourceNotLoaded.into());
    }
    Ok(SourceDimensionsDto::from(snapshot.as_ref()))
}
