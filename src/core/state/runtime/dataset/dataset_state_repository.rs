use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::state::runtime::dataset::dataset_state::DatasetState;
use crate::core::state::runtime::dataset::dataset_state_repository_trait::DatasetStateRepositoryTrait;

pub struct DatasetStateRepository {
    state: Arc<RwLock<Arc<DatasetState>>>,
}

impl DatasetStateRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(Arc::new(DatasetState::default()))),
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for DatasetStateRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DatasetStateRepositoryTrait for DatasetStateRepository {
    /// Return the shared Arc snapshot (zero cost).
    async fn get(&self) -> Arc<DatasetState> {
        self.state.read().await.clone()
    }

    /// Replace the Arc pointer; readers keep their old snapshot.
    async fn set(&self, new_state: DatasetState) {
        let mut guard = self.state.write().await;
        *guard = Arc::new(new_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::model::record::TelemetryRecord;

    #[tokio::test]
    async fn readers_keep_their_snapshot_across_reloads() {
        let repo = DatasetStateRepository::new();
        repo.set(DatasetState::from_records(
            "first.csv".into(),
            vec![TelemetryRecord::new(None, "auth", "/login", "eu", "200")],
        ))
        .await;

        let held = repo.get().await;
        repo.set(DatasetState::from_records("second.csv".into(), vec![]))
            .await;

        assert_eq!(held.source.as_deref().unwrap().to_str(), Some("first.csv"));
        let fresh = repo.get().await;
        assert_eq!(fresh.source.as_deref().unwrap().to_str(), Some("second.csv"));
    }
}
