//! Configured exchange provider.

use serde::{Deserialize, Serialize};

use super::id::ProviderName;

/// One configured exchange integration as recorded in the provider catalog.
///
/// The catalog, not this type, guarantees that at most one provider is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: ProviderName,
    pub is_active: bool,
}

impl Provider {
    pub fn new(name: impl Into<ProviderName>, is_active: bool) -> Self {
        Self {
            name: name.into(),
            is_active,
        }
    }
}
