use anyhow::Result;

/// CRUD surface of a single-entity configuration file.
pub trait InfoFixedFsAdapterTrait<T> {
    fn new() -> Self
    where
        Self: Sized;

    fn read(&self) -> Result<T>;
    fn insert(&self, data: &T) -> Result<()>;
    fn update(&self, data: &T) -> Result<()>;
    fn delete(&self) -> Result<()>;
}
