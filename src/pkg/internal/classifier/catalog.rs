//! Reference-data types the classifier matches against.
//!
//! The classifier only ever sees a read-only [`CatalogSnapshot`]; creating
//! missing entries goes through the [`CatalogStore`] trait so the core stays
//! storage-agnostic. Uniqueness of catalog names under concurrent writers is
//! the storage layer's job (unique index on lower(name)).

use serde::Serialize;

use crate::prelude::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageEntry {
    pub id: i32,
    pub name: String,
    pub iso_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeniorityLevelEntry {
    pub id: i32,
    pub name: String,
    pub min_years: i32,
    pub max_years: Option<i32>,
}

/// One read-only view of the reference tables, taken before classification.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub industries: Vec<CatalogEntry>,
    pub roles: Vec<CatalogEntry>,
    pub seniority_levels: Vec<SeniorityLevelEntry>,
    pub skills: Vec<CatalogEntry>,
    pub languages: Vec<LanguageEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Industry,
    Role,
    Skill,
    Language,
}

impl CatalogKind {
    pub fn table(&self) -> &'static str {
        match self {
            CatalogKind::Industry => "industries",
            CatalogKind::Role => "roles",
            CatalogKind::Skill => "skills",
            CatalogKind::Language => "languages",
        }
    }
}

/// Repository seam for the get-or-create pattern. `find_by_name` matches
/// case-insensitively; `create` relies on the store's unique constraint.
#[async_trait::async_trait]
pub trait CatalogStore {
    async fn find_by_name(
        &mut self,
        kind: CatalogKind,
        name: &str,
    ) -> Result<Option<CatalogEntry>>;

    async fn create(&mut self, kind: CatalogKind, name: &str) -> Result<CatalogEntry>;
}

pub async fn get_or_create<S: CatalogStore + Send>(
    store: &mut S,
    kind: CatalogKind,
    name: &str,
) -> Result<CatalogEntry> {
    if let Some(entry) = store.find_by_name(kind, name).await? {
        return Ok(entry);
    }
    store.create(kind, name).await
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[derive(Default)]
    struct MemStore {
        entries: Vec<(CatalogKind, CatalogEntry)>,
    }

    #[async_trait::async_trait]
    impl CatalogStore for MemStore {
        async fn find_by_name(
            &mut self,
            kind: CatalogKind,
            name: &str,
        ) -> Result<Option<CatalogEntry>> {
            Ok(self
                .entries
                .iter()
                .find(|(k, e)| *k == kind && e.name.eq_ignore_ascii_case(name))
                .map(|(_, e)| e.clone()))
        }

        async fn create(&mut self, kind: CatalogKind, name: &str) -> Result<CatalogEntry> {
            let entry = CatalogEntry {
                id: self.entries.len() as i32 + 1,
                name: name.to_string(),
            };
            self.entries.push((kind, entry.clone()));
            Ok(entry)
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn test_get_or_create_reuses_existing() -> Result<()> {
        let mut store = MemStore::default();
        let first = get_or_create(&mut store, CatalogKind::Skill, "Python").await?;
        let second = get_or_create(&mut store, CatalogKind::Skill, "python").await?;
        assert_eq!(first.id, second.id);
        assert_eq!(store.entries.len(), 1);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_get_or_create_is_scoped_by_kind() -> Result<()> {
        let mut store = MemStore::default();
        let skill = get_or_create(&mut store, CatalogKind::Skill, "Python").await?;
        let role = get_or_create(&mut store, CatalogKind::Role, "Python").await?;
        assert_ne!(skill.id, role.id);
        Ok(())
    }
}
