use sqlx::PgConnection;

use crate::pkg::internal::adaptors::catalog::spec::CatalogRow;
use crate::pkg::internal::classifier::catalog::{CatalogEntry, CatalogKind, CatalogStore};
use crate::prelude::Result;

/// Sqlx-backed [`CatalogStore`]. Name uniqueness is enforced by the unique
/// index on lower(name), which also makes `create` safe under concurrent
/// get-or-create races.
pub struct CatalogMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> CatalogMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        CatalogMutator { pool }
    }
}

#[async_trait::async_trait]
impl CatalogStore for CatalogMutator<'_> {
    async fn find_by_name(
        &mut self,
        kind: CatalogKind,
        name: &str,
    ) -> Result<Option<CatalogEntry>> {
        let query = format!(
            "SELECT id, name FROM {} WHERE name ILIKE '%' || $1 || '%' ORDER BY name LIMIT 1",
            kind.table()
        );
        let row = sqlx::query_as::<_, CatalogRow>(&query)
            .bind(name)
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn create(&mut self, kind: CatalogKind, name: &str) -> Result<CatalogEntry> {
        let query = format!(
            r#"
            INSERT INTO {} (name) VALUES ($1)
            ON CONFLICT ((lower(name))) DO UPDATE SET name = excluded.name
            RETURNING id, name
            "#,
            kind.table()
        );
        let row = sqlx::query_as::<_, CatalogRow>(&query)
            .bind(name.trim())
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(row.into())
    }
}
