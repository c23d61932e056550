use crate::core::persistence::info::fixed::info_fixed_fs_adapter_trait::InfoFixedFsAdapterTrait;

use super::info_llm_entity::InfoLlmEntity;

/// Repository seam over the persisted narrative-provider settings.
///
/// The settings service and the chat-completions client both read through
/// this trait, so tests can swap the file adapter for an in-memory one.
pub trait InfoLlmApiRepository {
    fn fs_adapter(&self) -> &dyn InfoFixedFsAdapterTrait<InfoLlmEntity>;

    /// Current settings, falling back to the env bootstrap on first run.
    fn read(&self) -> anyhow::Result<InfoLlmEntity> {
        self.fs_adapter().read()
    }

    fn update(&self, settings: &InfoLlmEntity) -> anyhow::Result<()> {
        self.fs_adapter().update(settings)
    }
}
