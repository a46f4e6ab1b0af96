//! SQLite provider catalog.
//!
//! Persists configured exchange providers and the single active flag.

use async_trait::async_trait;
use diesel::prelude::*;
use tracing::info;

use crate::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool,
};
use crate::adapter::outbound::sqlite::database::model::ProviderRow;
use crate::adapter::outbound::sqlite::database::schema::exchange_providers;
use crate::domain::{Provider, ProviderName};
use crate::error::{Error, Result};
use crate::port::ProviderCatalog;

/// SQLite-backed provider catalog.
///
/// [`activate`](Self::activate) clears every other flag in the same
/// transaction, so at most one row is active at any time.
#[derive(Clone)]
pub struct SqliteProviderCatalog {
    pool: DbPool,
}

impl SqliteProviderCatalog {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url` and apply pending migrations.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be built or migrations fail.
    pub fn open(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url)?;
        run_migrations(&pool)?;
        Ok(Self::new(pool))
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool.get().map_err(|e| Error::Database(e.to_string()))
    }

    /// Register `name` if it is not already present. Existing rows keep
    /// their active flag.
    ///
    /// # Errors
    /// Returns an error on a blank name or a database failure.
    pub fn upsert(&self, name: &ProviderName) -> Result<()> {
        if name.is_blank() {
            return Err(Error::InvalidArgument("provider name is empty".into()));
        }
        let mut conn = self.conn()?;
        diesel::insert_or_ignore_into(exchange_providers::table)
            .values(&ProviderRow {
                name: name.as_str().to_string(),
                is_active: false,
            })
            .execute(&mut conn)?;
        Ok(())
    }

    /// Make `name` the single active provider, registering it if needed.
    ///
    /// # Errors
    /// Returns an error on a blank name or a database failure.
    pub fn activate(&self, name: &ProviderName) -> Result<()> {
        if name.is_blank() {
            return Err(Error::InvalidArgument("provider name is empty".into()));
        }
        let mut conn = self.conn()?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::update(exchange_providers::table)
                .set(exchange_providers::is_active.eq(false))
                .execute(conn)?;
            diesel::replace_into(exchange_providers::table)
                .values(&ProviderRow {
                    name: name.as_str().to_string(),
                    is_active: true,
                })
                .execute(conn)?;
            Ok(())
        })?;
        info!(component = "catalog", provider = %name, "Activated exchange provider");
        Ok(())
    }

    /// Every registered provider, ordered by name.
    ///
    /// # Errors
    /// Returns an error on a database failure.
    pub fn list(&self) -> Result<Vec<Provider>> {
        let mut conn = self.conn()?;
        let rows: Vec<ProviderRow> = exchange_providers::table
            .order(exchange_providers::name.asc())
            .select(ProviderRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Provider::from).collect())
    }
}

#[async_trait]
impl ProviderCatalog for SqliteProviderCatalog {
    async fn active_provider(&self) -> Result<Option<ProviderName>> {
        let mut conn = self.conn()?;
        let name: Option<String> = exchange_providers::table
            .filter(exchange_providers::is_active.eq(true))
            .order(exchange_providers::name.asc())
            .select(exchange_providers::name)
            .first(&mut conn)
            .optional()?;
        Ok(name.map(ProviderName::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(dir: &tempfile::TempDir) -> SqliteProviderCatalog {
        let path = dir.path().join("catalog.db");
        SqliteProviderCatalog::open(path.to_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn empty_catalog_has_no_active_provider() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = setup(&dir);
        assert_eq!(catalog.active_provider().await.unwrap(), None);
        assert!(catalog.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upsert_registers_inactive() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = setup(&dir);
        catalog.upsert(&ProviderName::from("kraken")).unwrap();

        assert_eq!(catalog.list().unwrap(), vec![Provider::new("kraken", false)]);
        assert_eq!(catalog.active_provider().await.unwrap(), None);
    }

    #[tokio::test]
    async fn activate_keeps_a_single_active_row() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = setup(&dir);
        catalog.upsert(&ProviderName::from("binance")).unwrap();
        catalog.activate(&ProviderName::from("binance")).unwrap();
        catalog.activate(&ProviderName::from("kraken")).unwrap();

        assert_eq!(
            catalog.list().unwrap(),
            vec![Provider::new("binance", false), Provider::new("kraken", true)]
        );
        assert_eq!(
            catalog.active_provider().await.unwrap(),
            Some(ProviderName::from("kraken"))
        );
    }

    #[tokio::test]
    async fn upsert_does_not_clear_active_flag() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = setup(&dir);
        catalog.activate(&ProviderName::from("binance")).unwrap();
        catalog.upsert(&ProviderName::from("binance")).unwrap();

        assert_eq!(
            catalog.active_provider().await.unwrap(),
            Some(ProviderName::from("binance"))
        );
    }

    #[test]
    fn blank_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = setup(&dir);
        assert!(matches!(
            catalog.activate(&ProviderName::from("  ")),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            catalog.upsert(&ProviderName::from("")),
            Err(Error::InvalidArgument(_))
        ));
    }
}
