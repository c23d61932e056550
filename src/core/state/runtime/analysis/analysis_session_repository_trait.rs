use std::sync::Arc;

use async_trait::async_trait;

use crate::core::state::runtime::analysis::analysis_session_state::AnalysisSessionState;

#[async_trait]
pub trait AnalysisSessionRepositoryTrait: Send + Sync {
    /// Return the current store as an Arc.
    async fn get(&self) -> Arc<AnalysisSessionState>;

    /// Replace the entire store.
    async fn set(&self, state: AnalysisSessionState);

    /// Mutate the store using a closure (clone, apply, swap).
    async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut AnalysisSessionState) + Send + Sync;
}
