use std::sync::Arc;

use async_trait::async_trait;

use crate::core::state::runtime::dataset::dataset_state::DatasetState;

#[async_trait]
pub trait DatasetStateRepositoryTrait: Send + Sync {
    /// Return the current snapshot as an Arc; computations hold it for
    /// their whole run regardless of concurrent reloads.
    async fn get(&self) -> Arc<DatasetState>;

    /// Replace the entire snapshot atomically.
    async fn set(&self, state: DatasetState);
}
