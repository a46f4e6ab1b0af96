//! Fixed provider catalog for single-venue deployments.

use async_trait::async_trait;

use crate::domain::ProviderName;
use crate::error::Result;
use crate::port::ProviderCatalog;

/// Catalog that always reports the same active provider.
#[derive(Debug, Clone, Default)]
pub struct StaticProviderCatalog {
    active: Option<ProviderName>,
}

impl StaticProviderCatalog {
    pub fn new(active: Option<ProviderName>) -> Self {
        Self { active }
    }
}

#[async_trait]
impl ProviderCatalog for StaticProviderCatalog {
    async fn active_provider(&self) -> Result<Option<ProviderName>> {
        Ok(self.active.clone())
    }
}
