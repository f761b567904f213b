use sqlx::FromRow;

use crate::pkg::internal::classifier::catalog::{
    CatalogEntry, LanguageEntry, SeniorityLevelEntry,
};

#[derive(Debug, Clone, FromRow)]
pub struct CatalogRow {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct LanguageRow {
    pub id: i32,
    pub name: String,
    pub iso_code: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SeniorityLevelRow {
    pub id: i32,
    pub name: String,
    pub min_years: i32,
    pub max_years: Option<i32>,
}

impl From<CatalogRow> for CatalogEntry {
    fn from(row: CatalogRow) -> Self {
        CatalogEntry {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<LanguageRow> for LanguageEntry {
    fn from(row: LanguageRow) -> Self {
        LanguageEntry {
            id: row.id,
            name: row.name,
            iso_code: row.iso_code,
        }
    }
}

impl From<SeniorityLevelRow> for SeniorityLevelEntry {
    fn from(row: SeniorityLevelRow) -> Self {
        SeniorityLevelEntry {
            id: row.id,
            name: row.name,
            min_years: row.min_years,
            max_years: row.max_years,
        }
    }
}
