//! Heuristic CV classification and scoring.
//!
//! Pure, synchronous regex heuristics over one document's text plus a
//! read-only catalog snapshot. No network calls, no shared mutable state;
//! the same text and snapshot always produce the same profile.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod contact;
pub mod extract;
pub mod score;

use regex::Regex;
use serde::Serialize;
use standard_error::{Interpolate, StandardError};

use crate::prelude::Result;
use catalog::{CatalogEntry, CatalogSnapshot, LanguageEntry, SeniorityLevelEntry};
use classify::Seniority;
use config::ClassifierConfig;
use contact::ContactInfo;

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";
const LINKEDIN_PATTERN: &str = r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[a-zA-Z0-9\-_]+/?";
const GITHUB_PATTERN: &str = r"(?i)(?:https?://)?(?:www\.)?github\.com/[a-zA-Z0-9\-_]+/?";
const YEAR_TOKEN_PATTERN: &str = r"\b(?:19|20)\d{2}\b";
const DATE_TOKEN_PATTERN: &str = r"\b(?:19|20)\d{2}\b|\b(?:enero|febrero|marzo|abril|mayo|junio|julio|agosto|septiembre|octubre|noviembre|diciembre)\b";

pub struct Classifier {
    cfg: ClassifierConfig,
    email_re: Regex,
    phone_res: Vec<Regex>,
    linkedin_re: Regex,
    github_re: Regex,
    portfolio_res: Vec<Regex>,
    experience_res: Vec<Regex>,
    year_re: Regex,
    senior_res: Vec<Regex>,
    semi_senior_res: Vec<Regex>,
    junior_res: Vec<Regex>,
    date_re: Regex,
}

impl Classifier {
    pub fn new(cfg: ClassifierConfig) -> Result<Self> {
        Ok(Classifier {
            email_re: compile(EMAIL_PATTERN)?,
            phone_res: compile_all(cfg.phone_patterns)?,
            linkedin_re: compile(LINKEDIN_PATTERN)?,
            github_re: compile(GITHUB_PATTERN)?,
            portfolio_res: compile_all(cfg.portfolio_patterns)?,
            experience_res: compile_all(cfg.experience_patterns)?,
            year_re: compile(YEAR_TOKEN_PATTERN)?,
            senior_res: compile_all(cfg.senior_patterns)?,
            semi_senior_res: compile_all(cfg.semi_senior_patterns)?,
            junior_res: compile_all(cfg.junior_patterns)?,
            date_re: compile(DATE_TOKEN_PATTERN)?,
            cfg,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.cfg
    }

    /// Runs the full extraction and scoring pass over one document.
    pub fn profile(&self, text: &str, snapshot: &CatalogSnapshot) -> CandidateProfile {
        let contact = self.extract_contact_info(text);
        let full_name = self.extract_name(text);
        let years_experience = self.extract_years_experience(text);
        let seniority = self.classify_seniority(text, years_experience);
        let industry = self.classify_industry(text, &snapshot.industries).cloned();
        let role = self.classify_role(text, &snapshot.roles).cloned();
        let seniority_level = self
            .seniority_level_for_years(years_experience, &snapshot.seniority_levels)
            .cloned();
        let skills: Vec<CatalogEntry> = self
            .extract_skills(text, &snapshot.skills)
            .into_iter()
            .cloned()
            .collect();
        let languages: Vec<LanguageEntry> = self
            .extract_languages(text, &snapshot.languages)
            .into_iter()
            .cloned()
            .collect();
        let overall_score = self.score(text, &contact, years_experience, &skills, &languages);
        CandidateProfile {
            contact,
            full_name,
            years_experience,
            seniority,
            industry,
            role,
            seniority_level,
            skills,
            languages,
            overall_score,
        }
    }
}

/// Everything the heuristics could pull out of one resume.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateProfile {
    pub contact: ContactInfo,
    pub full_name: Option<String>,
    pub years_experience: u32,
    pub seniority: Seniority,
    pub industry: Option<CatalogEntry>,
    pub role: Option<CatalogEntry>,
    pub seniority_level: Option<SeniorityLevelEntry>,
    pub skills: Vec<CatalogEntry>,
    pub languages: Vec<LanguageEntry>,
    pub overall_score: f64,
}

/// Strips diacritics and lowercases, so accented Spanish terms compare
/// against the ASCII keyword tables.
pub(crate) fn normalize(text: &str) -> String {
    deunicode::deunicode(text).to_lowercase()
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| StandardError::new("ERR-CLS-000").interpolate_err(e.to_string()))
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns.iter().map(|p| compile(p)).collect()
}
