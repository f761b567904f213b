use pgvector::Vector;
use sqlx::PgConnection;

use crate::pkg::internal::adaptors::candidates::spec::{CandidateEntry, CANDIDATE_COLUMNS};
use crate::pkg::internal::classifier::CandidateProfile;
use crate::prelude::Result;

pub struct CandidateMutator<'a> {
    pool: &'a mut PgConnection,
}

impl<'a> CandidateMutator<'a> {
    pub fn new(pool: &'a mut PgConnection) -> Self {
        CandidateMutator { pool }
    }

    /// Creates the record as soon as the text is extracted, before any
    /// classification runs, so failed processing still leaves a row behind.
    pub async fn create_pending(
        &mut self,
        filename: &str,
        content: &str,
    ) -> Result<CandidateEntry> {
        let query = format!(
            r#"
            INSERT INTO candidates (filename, content, processed_status)
            VALUES ($1, $2, 'pending')
            RETURNING {CANDIDATE_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, CandidateEntry>(&query)
            .bind(filename)
            .bind(content)
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(row)
    }

    pub async fn set_status(&mut self, candidate_id: i32, status: &str) -> Result<CandidateEntry> {
        let query = format!(
            r#"
            UPDATE candidates
            SET processed_status = $2, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {CANDIDATE_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, CandidateEntry>(&query)
            .bind(candidate_id)
            .bind(status)
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(row)
    }

    /// Writes the extracted fields and score, marking the run completed.
    pub async fn apply_profile(
        &mut self,
        candidate_id: i32,
        profile: &CandidateProfile,
    ) -> Result<CandidateEntry> {
        let query = format!(
            r#"
            UPDATE candidates
            SET full_name = $2, email = $3, phone = $4, linkedin_url = $5,
                github_url = $6, portfolio_url = $7, years_experience = $8,
                seniority = $9, industry_id = $10, role_id = $11,
                seniority_level_id = $12, overall_score = $13,
                processed_status = 'completed', updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {CANDIDATE_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, CandidateEntry>(&query)
            .bind(candidate_id)
            .bind(&profile.full_name)
            .bind(&profile.contact.email)
            .bind(&profile.contact.phone)
            .bind(&profile.contact.linkedin_url)
            .bind(&profile.contact.github_url)
            .bind(&profile.contact.portfolio_url)
            .bind(profile.years_experience as i32)
            .bind(profile.seniority.as_str())
            .bind(profile.industry.as_ref().map(|e| e.id))
            .bind(profile.role.as_ref().map(|e| e.id))
            .bind(profile.seniority_level.as_ref().map(|e| e.id))
            .bind(profile.overall_score)
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(row)
    }

    /// Membership is deduplicated by the junction table's composite key.
    pub async fn link_skills(&mut self, candidate_id: i32, skill_ids: &[i32]) -> Result<()> {
        for skill_id in skill_ids {
            sqlx::query(
                r#"
                INSERT INTO candidate_skills (candidate_id, skill_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(candidate_id)
            .bind(skill_id)
            .execute(&mut *self.pool)
            .await?;
        }
        Ok(())
    }

    pub async fn link_languages(
        &mut self,
        candidate_id: i32,
        language_ids: &[i32],
    ) -> Result<()> {
        for language_id in language_ids {
            sqlx::query(
                r#"
                INSERT INTO candidate_languages (candidate_id, language_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(candidate_id)
            .bind(language_id)
            .execute(&mut *self.pool)
            .await?;
        }
        Ok(())
    }

    pub async fn add_embedding(&mut self, candidate_id: i32, embedding: Vector) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE candidates
            SET embedding = $2, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            "#,
        )
        .bind(candidate_id)
        .bind(&embedding)
        .execute(&mut *self.pool)
        .await?;
        Ok(())
    }
}
