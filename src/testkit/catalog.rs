//! Fixed-answer provider catalog.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::ProviderName;
use crate::error::{Error, Result};
use crate::port::ProviderCatalog;

/// Catalog returning a settable answer and counting queries.
pub struct StaticCatalog {
    answer: Mutex<Option<ProviderName>>,
    failing: bool,
    queries: AtomicU32,
}

impl StaticCatalog {
    pub fn active(name: &str) -> Self {
        Self {
            answer: Mutex::new(Some(ProviderName::from(name))),
            failing: false,
            queries: AtomicU32::new(0),
        }
    }

    pub fn none() -> Self {
        Self {
            answer: Mutex::new(None),
            failing: false,
            queries: AtomicU32::new(0),
        }
    }

    /// A catalog whose every query fails.
    pub fn failing() -> Self {
        Self {
            answer: Mutex::new(None),
            failing: true,
            queries: AtomicU32::new(0),
        }
    }

    pub fn set_active(&self, name: Option<&str>) {
        *self.answer.lock() = name.map(ProviderName::from);
    }

    pub fn queries(&self) -> u32 {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderCatalog for StaticCatalog {
    async fn active_provider(&self) -> Result<Option<ProviderName>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(Error::Database("catalog unavailable".into()));
        }
        Ok(self.answer.lock().clone())
    }
}
