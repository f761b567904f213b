use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::pkg::internal::adaptors::candidates::selectors::CandidateSelector;
use crate::pkg::internal::adaptors::candidates::spec::CandidateEntry;
use crate::pkg::internal::ai::generate::GenerateOps;
use crate::pkg::internal::ai::index::IndexOps;
use crate::pkg::server::state::{AppState, GetTxn};
use crate::prelude::Result;

const CONTEXT_CHARS_PER_RESUME: usize = 2000;

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub limit: Option<i64>,
}

/// Nearest-neighbor retrieval over the candidate embeddings.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CandidateEntry>>> {
    let embedding = state.ai_client.index_document(&params.query).await?;
    let limit = params.limit.unwrap_or(5).clamp(1, 50);
    let mut tx = state.db_pool.begin_txn().await?;
    let matches = CandidateSelector::new(&mut tx).nearest(embedding, limit).await?;
    Ok(Json(matches))
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub sources: Vec<i32>,
}

/// Answers a free-form question grounded in the closest resumes.
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    let embedding = state.ai_client.index_document(&request.question).await?;
    let mut tx = state.db_pool.begin_txn().await?;
    let matches = CandidateSelector::new(&mut tx).nearest(embedding, 5).await?;

    let context = matches
        .iter()
        .map(|c| {
            format!(
                "Resume {} ({}):\n{}",
                c.id,
                c.filename,
                truncate(&c.content, CONTEXT_CHARS_PER_RESUME)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");
    let answer = state
        .ai_client
        .direct_query(&request.question, Some(&context))
        .await?;

    Ok(Json(AskResponse {
        answer,
        sources: matches.iter().map(|c| c.id).collect(),
    }))
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("añádelo", 3), "añá");
        assert_eq!(truncate("short", 100), "short");
    }
}
