use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::state::runtime::analysis::analysis_session_repository_trait::AnalysisSessionRepositoryTrait;
use crate::core::state::runtime::analysis::analysis_session_state::AnalysisSessionState;

pub struct AnalysisSessionRepository {
    state: Arc<RwLock<Arc<AnalysisSessionState>>>,
}

impl AnalysisSessionRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(Arc::new(AnalysisSessionState::default()))),
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for AnalysisSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AnalysisSessionRepositoryTrait for AnalysisSessionRepository {
    async fn get(&self) -> Arc<AnalysisSessionState> {
        self.state.read().await.clone()
    }

    async fn set(&self, new_state: AnalysisSessionState) {
        let mut guard = self.state.write().await;
        *guard = Arc::new(new_state);
    }

    async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut AnalysisSessionState) + Send + Sync,
    {
        let mut guard = self.state.write().await;
        let mut new_state = (**guard).clone();
        f(&mut new_state);
        *guard = Arc::new(new_state);
    }
}
