//! Package catalogue over the in-memory store.

use async_trait::async_trait;
use uuid::Uuid;

use super::MemoryStore;
use crate::domain::Package;
use crate::domain::ports::{PackageCatalogue, PackageCatalogueError};

impl MemoryStore {
    /// Add packages to the catalogue, replacing any with the same id.
    ///
    /// Returns how many packages the catalogue holds afterwards.
    pub fn load_packages(
        &self,
        packages: impl IntoIterator<Item = Package>,
    ) -> Result<usize, PackageCatalogueError> {
        let mut state = self
            .lock()
            .map_err(|err| PackageCatalogueError::connection(err.message()))?;
        for package in packages {
            state.packages.retain(|stored| stored.id() != package.id());
            state.packages.push(package);
        }
        Ok(state.packages.len())
    }
}

#[async_trait]
impl PackageCatalogue for MemoryStore {
    async fn get_package(&self, id: Uuid) -> Result<Option<Package>, PackageCatalogueError> {
        let state = self
            .lock()
            .map_err(|err| PackageCatalogueError::connection(err.message()))?;
        Ok(state
            .packages
            .iter()
            .find(|package| package.id() == id)
            .cloned())
    }

    async fn list_packages(&self) -> Result<Vec<Package>, PackageCatalogueError> {
        let state = self
            .lock()
            .map_err(|err| PackageCatalogueError::connection(err.message()))?;
        Ok(state.packages.clone())
    }
}
