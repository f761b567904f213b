//! Background processing of one uploaded resume: classify, score, persist,
//! index. The record already exists by the time this runs, so any failure
//! flags it as `error` instead of dropping it.

use crate::conf::settings;
use crate::pkg::internal::adaptors::candidates::mutators::CandidateMutator;
use crate::pkg::internal::adaptors::candidates::spec::CandidateEntry;
use crate::pkg::internal::adaptors::catalog::mutators::CatalogMutator;
use crate::pkg::internal::adaptors::catalog::selectors::CatalogSelector;
use crate::pkg::internal::ai::analysis::{analysis_prompt, parse_analysis, CvAnalysis};
use crate::pkg::internal::ai::generate::GenerateOps;
use crate::pkg::internal::ai::index::{embedding_text, IndexOps};
use crate::pkg::internal::classifier::catalog::{
    get_or_create, CatalogEntry, CatalogKind, CatalogSnapshot, LanguageEntry,
};
use crate::pkg::internal::classifier::classify::Seniority;
use crate::pkg::internal::classifier::contact::ContactInfo;
use crate::pkg::internal::classifier::CandidateProfile;
use crate::pkg::server::state::{AppState, GetTxn};
use crate::prelude::Result;

pub async fn process_candidate(state: AppState, candidate: CandidateEntry) {
    if let Err(e) = run(&state, &candidate).await {
        tracing::error!("processing failed for {}: {}", &candidate.filename, e);
        match state.db_pool.begin_txn().await {
            Ok(mut tx) => {
                let flagged = CandidateMutator::new(&mut tx)
                    .set_status(candidate.id, "error")
                    .await;
                match flagged {
                    Ok(_) => {
                        if let Err(e) = tx.commit().await {
                            tracing::error!("could not persist error status: {}", e);
                        }
                    }
                    Err(e) => tracing::error!("could not flag candidate as errored: {}", e),
                }
            }
            Err(e) => tracing::error!("could not open transaction for error status: {}", e),
        }
    }
}

async fn run(state: &AppState, candidate: &CandidateEntry) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    CandidateMutator::new(&mut tx)
        .set_status(candidate.id, "processing")
        .await?;

    // a missing catalog degrades to "no classification", never an abort
    let snapshot = match CatalogSelector::new(&mut tx).snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("catalog unavailable, classifying without reference data: {}", e);
            CatalogSnapshot::default()
        }
    };

    let (profile, llm_blob) = match settings.analysis_mode.as_str() {
        "llm" => match llm_profile(state, &mut tx, candidate, &snapshot).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("llm analysis failed, falling back to heuristics: {}", e);
                (state.classifier.profile(&candidate.content, &snapshot), None)
            }
        },
        _ => (state.classifier.profile(&candidate.content, &snapshot), None),
    };

    CandidateMutator::new(&mut tx)
        .apply_profile(candidate.id, &profile)
        .await?;
    let skill_ids: Vec<i32> = profile.skills.iter().map(|s| s.id).collect();
    let language_ids: Vec<i32> = profile.languages.iter().map(|l| l.id).collect();
    CandidateMutator::new(&mut tx)
        .link_skills(candidate.id, &skill_ids)
        .await?;
    CandidateMutator::new(&mut tx)
        .link_languages(candidate.id, &language_ids)
        .await?;
    tx.commit().await?;
    tracing::info!(
        "processed {}: score {}, {} skills, {} languages",
        &candidate.filename,
        profile.overall_score,
        skill_ids.len(),
        language_ids.len()
    );

    // indexing failures leave a completed record without an embedding
    let blob = llm_blob.unwrap_or_else(|| embedding_text(&profile));
    match state.ai_client.index_document(&blob).await {
        Ok(embedding) => {
            let mut tx = state.db_pool.begin_txn().await?;
            CandidateMutator::new(&mut tx)
                .add_embedding(candidate.id, embedding)
                .await?;
            tx.commit().await?;
            tracing::debug!("embedding stored for {}", &candidate.filename);
        }
        Err(e) => {
            tracing::error!("error creating embeddings for {}: {}", &candidate.filename, e);
        }
    }
    Ok(())
}

async fn llm_profile(
    state: &AppState,
    tx: &mut sqlx::PgConnection,
    candidate: &CandidateEntry,
    snapshot: &CatalogSnapshot,
) -> Result<(CandidateProfile, Option<String>)> {
    let prompt = analysis_prompt(&candidate.content);
    let response = state.ai_client.direct_query(&prompt, None).await?;
    let analysis = parse_analysis(&response)?;
    tracing::debug!("llm analysis v{} for {}", analysis.version, &candidate.filename);
    let blob = analysis
        .embedding_text
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string);
    let profile = profile_from_analysis(state, tx, candidate, analysis, snapshot).await?;
    Ok((profile, blob))
}

/// Materializes the LLM analysis as a profile, creating any catalog entries
/// it mentions for the first time.
async fn profile_from_analysis(
    state: &AppState,
    tx: &mut sqlx::PgConnection,
    candidate: &CandidateEntry,
    analysis: CvAnalysis,
    snapshot: &CatalogSnapshot,
) -> Result<CandidateProfile> {
    let mut store = CatalogMutator::new(tx);

    let industry = match analysis.sector.as_deref().map(str::trim) {
        Some(sector) if !sector.is_empty() && !sector.eq_ignore_ascii_case("general") => {
            Some(get_or_create(&mut store, CatalogKind::Industry, sector).await?)
        }
        _ => None,
    };
    let role = match analysis.suggested_role.as_deref().map(str::trim) {
        Some(role) if !role.is_empty() => {
            Some(get_or_create(&mut store, CatalogKind::Role, role).await?)
        }
        _ => None,
    };

    let mut skills: Vec<CatalogEntry> = Vec::new();
    for name in analysis
        .technical_skills
        .iter()
        .chain(analysis.soft_skills.iter())
    {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let entry = get_or_create(&mut store, CatalogKind::Skill, name).await?;
        if !skills.iter().any(|s| s.id == entry.id) {
            skills.push(entry);
        }
    }

    let mut languages: Vec<LanguageEntry> = Vec::new();
    for spoken in &analysis.languages {
        let name = spoken.language.trim();
        if name.is_empty() {
            continue;
        }
        let entry = get_or_create(&mut store, CatalogKind::Language, name).await?;
        if !languages.iter().any(|l| l.id == entry.id) {
            languages.push(LanguageEntry {
                id: entry.id,
                name: entry.name,
                iso_code: None,
            });
        }
    }

    let years_experience = analysis.years_experience;
    let seniority = analysis
        .seniority
        .as_deref()
        .and_then(Seniority::parse)
        .unwrap_or_else(|| {
            state
                .classifier
                .classify_seniority(&candidate.content, years_experience)
        });
    let seniority_level = state
        .classifier
        .seniority_level_for_years(years_experience, &snapshot.seniority_levels)
        .cloned();

    let contact = ContactInfo {
        email: clean(analysis.email),
        phone: clean(analysis.phone),
        linkedin_url: clean(analysis.linkedin_url),
        github_url: clean(analysis.github_url),
        portfolio_url: clean(analysis.portfolio_url),
    };

    Ok(CandidateProfile {
        contact,
        full_name: clean(analysis.full_name),
        years_experience,
        seniority,
        industry,
        role,
        seniority_level,
        skills,
        languages,
        overall_score: (analysis.overall_score.clamp(0.0, 100.0) * 100.0).round() / 100.0,
    })
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("null"))
}
