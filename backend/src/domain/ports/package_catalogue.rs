//! Read-only port onto the package catalogue.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Package;

use super::define_port_error;

define_port_error! {
    /// Errors raised by package catalogue adapters.
    pub enum PackageCatalogueError {
        /// Catalogue backend could not be reached.
        Connection { message: String } => "package catalogue connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "package catalogue query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageCatalogue: Send + Sync {
    async fn get_package(&self, id: Uuid) -> Result<Option<Package>, PackageCatalogueError>;

    /// Every package on offer, in catalogue order.
    async fn list_packages(&self) -> Result<Vec<Package>, PackageCatalogueError>;
}

/// Catalogue with a fixed list of packages.
#[derive(Debug, Default, Clone)]
pub struct FixturePackageCatalogue {
    packages: Vec<Package>,
}

impl FixturePackageCatalogue {
    pub fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }
}

#[async_trait]
impl PackageCatalogue for FixturePackageCatalogue {
    async fn get_package(&self, id: Uuid) -> Result<Option<Package>, PackageCatalogueError> {
        Ok(self
            .packages
            .iter()
            .find(|package| package.id() == id)
            .cloned())
    }

    async fn list_packages(&self) -> Result<Vec<Package>, PackageCatalogueError> {
        Ok(self.packages.clone())
    }
}
