//! LLM-backed resume analysis.
//!
//! The model's reply is deserialized into a versioned [`CvAnalysis`] record
//! with defaults for every missing key, so a partial reply degrades instead
//! of failing. Callers fall back to the heuristic classifier when the reply
//! cannot be parsed at all.

use serde::{Deserialize, Serialize};
use standard_error::{Interpolate, StandardError};

use crate::prelude::Result;

pub const ANALYSIS_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvAnalysis {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub suggested_role: Option<String>,
    #[serde(default)]
    pub seniority: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<LanguageLevel>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default = "default_score")]
    pub overall_score: f64,
    #[serde(default)]
    pub embedding_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageLevel {
    pub language: String,
    #[serde(default)]
    pub level: Option<String>,
}

fn default_version() -> u32 {
    ANALYSIS_VERSION
}

fn default_score() -> f64 {
    50.0
}

pub fn analysis_prompt(cv_text: &str) -> String {
    format!(
        r#"
You are a senior technical recruiter. Analyze the resume below, which may be
written in Spanish or English, and return your assessment as valid JSON.

RESUME:
{cv_text}

Extract contact details, the suggested role, the seniority level (one of
"junior", "semi-senior", "senior"), the industry sector, the years of
experience as an integer, technical and soft skills, spoken languages, and
certifications. Deduce skills from coursework and projects when the candidate
has little formal experience. Score the resume 0-100 for clarity,
completeness and career projection.

Return ONLY valid JSON in this exact format (no additional text):

{{
  "version": 1,
  "full_name": "...",
  "email": "...",
  "phone": "...",
  "linkedin_url": "...",
  "github_url": "...",
  "portfolio_url": "...",
  "suggested_role": "...",
  "seniority": "junior",
  "sector": "...",
  "years_experience": 0,
  "summary": "...",
  "technical_skills": ["..."],
  "soft_skills": ["..."],
  "languages": [{{"language": "...", "level": "..."}}],
  "certifications": ["..."],
  "overall_score": 50.0,
  "embedding_text": "..."
}}

Use null for anything the resume does not contain. You will output only valid
JSON, never markdown, never text explanations.
"#
    )
}

/// Strips code fences and leading chatter, then deserializes.
pub fn parse_analysis(response: &str) -> Result<CvAnalysis> {
    let cleaned = response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    let json = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => cleaned,
    };
    serde_json::from_str(json)
        .map_err(|e| StandardError::new("ERR-AI-003").interpolate_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_markdown_fences() -> Result<()> {
        let response = "```json\n{\"full_name\": \"Jane Doe\", \"overall_score\": 81.5}\n```";
        let analysis = parse_analysis(response)?;
        assert_eq!(analysis.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(analysis.overall_score, 81.5);
        Ok(())
    }

    #[test]
    fn test_missing_keys_get_defaults() -> Result<()> {
        let analysis = parse_analysis("{}")?;
        assert_eq!(analysis.version, ANALYSIS_VERSION);
        assert_eq!(analysis.years_experience, 0);
        assert_eq!(analysis.overall_score, 50.0);
        assert!(analysis.technical_skills.is_empty());
        assert_eq!(analysis.email, None);
        Ok(())
    }

    #[test]
    fn test_parse_tolerates_leading_chatter() -> Result<()> {
        let response = "Here is the analysis you asked for:\n{\"seniority\": \"senior\"}";
        let analysis = parse_analysis(response)?;
        assert_eq!(analysis.seniority.as_deref(), Some("senior"));
        Ok(())
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(parse_analysis("not json at all").is_err());
    }
}
