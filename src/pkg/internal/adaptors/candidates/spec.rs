use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One processed resume. Rows are created once per upload, mutated only
/// during their own initial processing, and never deleted here; even a
/// failed run keeps filename and raw content so it stays auditable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateEntry {
    pub id: i32,
    pub filename: String,
    pub content: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub years_experience: i32,
    pub seniority: Option<String>,
    pub industry_id: Option<i32>,
    pub role_id: Option<i32>,
    pub seniority_level_id: Option<i32>,
    pub overall_score: f64,
    pub processed_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const CANDIDATE_COLUMNS: &str = "id, filename, content, full_name, email, phone, \
     linkedin_url, github_url, portfolio_url, years_experience, seniority, industry_id, \
     role_id, seniority_level_id, overall_score, processed_status, created_at, updated_at";

/// Detail view joined with the catalog names.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateAnalysis {
    pub id: i32,
    pub filename: String,
    pub overall_score: f64,
    pub processed_status: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub industry: Option<String>,
    pub role: Option<String>,
    pub seniority: Option<String>,
    pub seniority_level: Option<String>,
    pub years_experience: i32,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
}
