use std::sync::Arc;

use ai::{
    clients::openai::Client,
    embeddings::{Embeddings, EmbeddingsRequestBuilder},
};
use pgvector::Vector;
use standard_error::{Interpolate, StandardError};

use crate::pkg::internal::classifier::CandidateProfile;
use crate::{conf::settings, prelude::Result};

#[async_trait::async_trait]
pub trait IndexOps {
    async fn index_document(&self, content: &str) -> Result<Vector>;
}

#[async_trait::async_trait]
impl IndexOps for Arc<Client> {
    async fn index_document(&self, content: &str) -> Result<Vector> {
        let model = match settings.ai_provider.as_str() {
            "ollama" => "nomic-embed-text",
            "gemini" => "text-embedding-004",
            "openai" => "text-embedding-3-large",
            _ => {
                return Err(
                    StandardError::new("ERR-AI-004").interpolate_err("invalid model".into())
                )
            }
        };
        let request = EmbeddingsRequestBuilder::default()
            .model(model)
            .input(vec![content.to_string()])
            .build()
            .map_err(|e| StandardError::new("ERR-AI-004").interpolate_err(e.to_string()))?;
        let response = self
            .create_embeddings(&request)
            .await
            .map_err(|e| StandardError::new("ERR-AI-004").interpolate_err(e.to_string()))?;
        let embedding_vec: Vec<f32> = response.data[0]
            .embedding
            .iter()
            .map(|&x| x as f32)
            .collect();
        Ok(Vector::from(embedding_vec))
    }
}

/// Synthesizes the text blob that gets embedded for one candidate, so
/// semantic search works over the structured signals rather than raw noise.
pub fn embedding_text(profile: &CandidateProfile) -> String {
    let mut parts = Vec::new();
    if let Some(name) = &profile.full_name {
        parts.push(format!("Name: {name}"));
    }
    if let Some(role) = &profile.role {
        parts.push(format!("Role: {}", role.name));
    }
    parts.push(format!("Seniority: {}", profile.seniority));
    if profile.years_experience > 0 {
        parts.push(format!("Experience: {} years", profile.years_experience));
    }
    if let Some(industry) = &profile.industry {
        parts.push(format!("Industry: {}", industry.name));
    }
    if !profile.skills.is_empty() {
        let names: Vec<&str> = profile.skills.iter().map(|s| s.name.as_str()).collect();
        parts.push(format!("Skills: {}", names.join(", ")));
    }
    if !profile.languages.is_empty() {
        let names: Vec<&str> = profile.languages.iter().map(|l| l.name.as_str()).collect();
        parts.push(format!("Languages: {}", names.join(", ")));
    }
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::classifier::catalog::CatalogEntry;
    use crate::pkg::internal::classifier::classify::Seniority;
    use crate::pkg::internal::classifier::contact::ContactInfo;

    #[test]
    fn test_embedding_text_skips_missing_fields() {
        let profile = CandidateProfile {
            contact: ContactInfo::default(),
            full_name: Some("Jane Doe".into()),
            years_experience: 0,
            seniority: Seniority::Junior,
            industry: None,
            role: Some(CatalogEntry {
                id: 1,
                name: "Desarrollador".into(),
            }),
            seniority_level: None,
            skills: vec![],
            languages: vec![],
            overall_score: 12.5,
        };
        let text = embedding_text(&profile);
        assert_eq!(text, "Name: Jane Doe\nRole: Desarrollador\nSeniority: junior");
    }
}
