use sqlx::PgConnection;

use crate::pkg::internal::adaptors::catalog::spec::{
    CatalogRow, LanguageRow, SeniorityLevelRow,
};
use crate::pkg::internal::classifier::catalog::CatalogSnapshot;
use crate::prelude::Result;

pub struct CatalogSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> CatalogSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        CatalogSelector { pool }
    }

    /// Loads the read-only view of all reference tables the classifier
    /// matches against.
    pub async fn snapshot(&mut self) -> Result<CatalogSnapshot> {
        let industries = sqlx::query_as::<_, CatalogRow>("SELECT id, name FROM industries")
            .fetch_all(&mut *self.pool)
            .await?;
        let roles = sqlx::query_as::<_, CatalogRow>("SELECT id, name FROM roles")
            .fetch_all(&mut *self.pool)
            .await?;
        let seniority_levels = sqlx::query_as::<_, SeniorityLevelRow>(
            "SELECT id, name, min_years, max_years FROM seniority_levels",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        let skills = sqlx::query_as::<_, CatalogRow>("SELECT id, name FROM skills")
            .fetch_all(&mut *self.pool)
            .await?;
        let languages =
            sqlx::query_as::<_, LanguageRow>("SELECT id, name, iso_code FROM languages")
                .fetch_all(&mut *self.pool)
                .await?;

        Ok(CatalogSnapshot {
            industries: industries.into_iter().map(Into::into).collect(),
            roles: roles.into_iter().map(Into::into).collect(),
            seniority_levels: seniority_levels.into_iter().map(Into::into).collect(),
            skills: skills.into_iter().map(Into::into).collect(),
            languages: languages.into_iter().map(Into::into).collect(),
        })
    }
}
