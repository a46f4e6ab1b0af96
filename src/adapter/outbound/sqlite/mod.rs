//! SQLite persistence adapters.
//!
//! Provides the Diesel-backed provider catalog.

pub mod catalog;
pub mod database;

pub use catalog::SqliteProviderCatalog;
