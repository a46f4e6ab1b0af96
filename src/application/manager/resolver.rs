//! Active provider resolution.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::ProviderName;
use crate::port::ProviderCatalog;

const COMPONENT: &str = "provider_resolver";

/// Looks up the provider currently flagged active in the catalog.
pub struct ProviderResolver {
    catalog: Arc<dyn ProviderCatalog>,
}

impl ProviderResolver {
    pub fn new(catalog: Arc<dyn ProviderCatalog>) -> Self {
        Self { catalog }
    }

    /// The active provider, or `None` if none is active or the lookup fails.
    ///
    /// Catalog errors are logged and reported as "no active provider".
    pub async fn fetch_active_provider(&self) -> Option<ProviderName> {
        match self.catalog.active_provider().await {
            Ok(Some(provider)) if !provider.is_blank() => {
                debug!(component = COMPONENT, provider = %provider, "Resolved active provider");
                Some(provider)
            }
            Ok(_) => {
                debug!(component = COMPONENT, "No active provider configured");
                None
            }
            Err(e) => {
                error!(
                    component = COMPONENT,
                    error = %e,
                    "Failed to query active provider"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::catalog::StaticCatalog;

    #[tokio::test]
    async fn returns_active_provider() {
        let resolver = ProviderResolver::new(Arc::new(StaticCatalog::active("binance")));
        assert_eq!(
            resolver.fetch_active_provider().await,
            Some(ProviderName::from("binance"))
        );
    }

    #[tokio::test]
    async fn empty_catalog_is_no_provider() {
        let resolver = ProviderResolver::new(Arc::new(StaticCatalog::none()));
        assert_eq!(resolver.fetch_active_provider().await, None);
    }

    #[tokio::test]
    async fn failure_is_no_provider() {
        let resolver = ProviderResolver::new(Arc::new(StaticCatalog::failing()));
        assert_eq!(resolver.fetch_active_provider().await, None);
    }

    #[tokio::test]
    async fn blank_name_is_no_provider() {
        let resolver = ProviderResolver::new(Arc::new(StaticCatalog::active("  ")));
        assert_eq!(resolver.fetch_active_provider().await, None);
    }
}
