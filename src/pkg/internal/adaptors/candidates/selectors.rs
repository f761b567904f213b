use pgvector::Vector;
use sqlx::PgConnection;

use crate::pkg::internal::adaptors::candidates::spec::{
    CandidateAnalysis, CandidateEntry, CANDIDATE_COLUMNS,
};
use crate::prelude::Result;

pub struct CandidateSelector<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        CandidateSelector { pool }
    }

    pub async fn get_by_id(&mut self, candidate_id: i32) -> Result<Option<CandidateEntry>> {
        let query = format!("SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1");
        let row = sqlx::query_as::<_, CandidateEntry>(&query)
            .bind(candidate_id)
            .fetch_optional(&mut *self.pool)
            .await?;
        Ok(row)
    }

    pub async fn list(&mut self) -> Result<Vec<CandidateEntry>> {
        let query =
            format!("SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, CandidateEntry>(&query)
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }

    /// Detail view with catalog names and the skill/language sets resolved.
    pub async fn analysis(&mut self, candidate_id: i32) -> Result<Option<CandidateAnalysis>> {
        let Some(candidate) = self.get_by_id(candidate_id).await? else {
            return Ok(None);
        };

        let industry = match candidate.industry_id {
            Some(id) => {
                sqlx::query_scalar::<_, String>("SELECT name FROM industries WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&mut *self.pool)
                    .await?
            }
            None => None,
        };
        let role = match candidate.role_id {
            Some(id) => sqlx::query_scalar::<_, String>("SELECT name FROM roles WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *self.pool)
                .await?,
            None => None,
        };
        let seniority_level = match candidate.seniority_level_id {
            Some(id) => {
                sqlx::query_scalar::<_, String>("SELECT name FROM seniority_levels WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&mut *self.pool)
                    .await?
            }
            None => None,
        };
        let skills = sqlx::query_scalar::<_, String>(
            r#"
            SELECT s.name FROM skills s
            JOIN candidate_skills cs ON cs.skill_id = s.id
            WHERE cs.candidate_id = $1
            ORDER BY s.name
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&mut *self.pool)
        .await?;
        let languages = sqlx::query_scalar::<_, String>(
            r#"
            SELECT l.name FROM languages l
            JOIN candidate_languages cl ON cl.language_id = l.id
            WHERE cl.candidate_id = $1
            ORDER BY l.name
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&mut *self.pool)
        .await?;

        Ok(Some(CandidateAnalysis {
            id: candidate.id,
            filename: candidate.filename,
            overall_score: candidate.overall_score,
            processed_status: candidate.processed_status,
            full_name: candidate.full_name,
            email: candidate.email,
            phone: candidate.phone,
            linkedin_url: candidate.linkedin_url,
            github_url: candidate.github_url,
            portfolio_url: candidate.portfolio_url,
            industry,
            role,
            seniority: candidate.seniority,
            seniority_level,
            years_experience: candidate.years_experience,
            skills,
            languages,
        }))
    }

    /// Nearest candidates to the query embedding, cosine distance order.
    pub async fn nearest(&mut self, embedding: Vector, limit: i64) -> Result<Vec<CandidateEntry>> {
        let query = format!(
            r#"
            SELECT {CANDIDATE_COLUMNS} FROM candidates
            WHERE embedding IS NOT NULL
            ORDER BY embedding <=> $1
            LIMIT $2
            "#
        );
        let rows = sqlx::query_as::<_, CandidateEntry>(&query)
            .bind(&embedding)
            .bind(limit)
            .fetch_all(&mut *self.pool)
            .await?;
        Ok(rows)
    }
}
