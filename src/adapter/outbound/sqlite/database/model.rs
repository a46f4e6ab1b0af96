//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::exchange_providers;
use crate::domain::{Provider, ProviderName};

/// Database row for a configured exchange provider.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = exchange_providers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProviderRow {
    pub name: String,
    pub is_active: bool,
}

impl From<ProviderRow> for Provider {
    fn from(row: ProviderRow) -> Self {
        Provider::new(ProviderName::new(row.name), row.is_active)
    }
}
