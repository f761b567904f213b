use std::path::Path;

use axum::body::Bytes;
use axum::extract::{Multipart, Path as AxumPath, State};
use axum::http::StatusCode;
use axum::Json;
use standard_error::{Interpolate, StandardError, Status};

use crate::pkg::internal::adaptors::candidates::mutators::CandidateMutator;
use crate::pkg::internal::adaptors::candidates::selectors::CandidateSelector;
use crate::pkg::internal::adaptors::candidates::spec::{CandidateAnalysis, CandidateEntry};
use crate::pkg::internal::ai::read::extract_document;
use crate::pkg::internal::pipeline::process_candidate;
use crate::pkg::server::state::{AppState, GetTxn};
use crate::prelude::Result;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CandidateEntry>> {
    let mut uploaded: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| StandardError::new(&format!("CAND-001: {}", e)))?
    {
        match field.name().unwrap_or("") {
            "resume" => {
                let file_name = field.file_name().unwrap_or("unknown").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| StandardError::new("CAND-002").interpolate_err(e.to_string()))?;
                let extension = Path::new(&file_name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .unwrap_or("")
                    .to_lowercase();
                if extension != "pdf" {
                    return Err(StandardError::new(
                        "CAND-003: Invalid file type. Only PDF files are allowed",
                    ));
                }
                if data.len() > MAX_UPLOAD_BYTES {
                    return Err(StandardError::new(
                        "CAND-004: File too large. Maximum size is 10MB",
                    ));
                }
                uploaded = Some((file_name, data));
            }
            _ => {
                let _ = field
                    .bytes()
                    .await
                    .map_err(|e| StandardError::new(&format!("CAND-005: {}", e)))?;
            }
        }
    }
    let (filename, data) =
        uploaded.ok_or_else(|| StandardError::new("CAND-006: missing resume field"))?;

    // a resume the reader cannot extract text from never reaches the
    // classifier; the upload is rejected outright
    let content = extract_document(data.into(), "application/pdf")?;

    let mut tx = state.db_pool.begin_txn().await?;
    let candidate = CandidateMutator::new(&mut tx)
        .create_pending(&filename, &content)
        .await?;
    tx.commit().await?;

    tokio::spawn(process_candidate(state.clone(), candidate.clone()));
    Ok(Json(candidate))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CandidateEntry>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let candidates = CandidateSelector::new(&mut tx).list().await?;
    Ok(Json(candidates))
}

pub async fn detail(
    State(state): State<AppState>,
    AxumPath(candidate_id): AxumPath<i32>,
) -> Result<Json<CandidateAnalysis>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let analysis = CandidateSelector::new(&mut tx)
        .analysis(candidate_id)
        .await?
        .ok_or_else(|| {
            StandardError::new("CAND-404: candidate not found").code(StatusCode::NOT_FOUND)
        })?;
    Ok(Json(analysis))
}
