use std::collections::HashSet;
use std::fmt;

use regex::Regex;
use serde::Serialize;

use super::catalog::{CatalogEntry, LanguageEntry, SeniorityLevelEntry};
use super::config::KeywordGroup;
use super::{normalize, Classifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Seniority {
    Senior,
    SemiSenior,
    Junior,
}

impl Seniority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Senior => "senior",
            Seniority::SemiSenior => "semi-senior",
            Seniority::Junior => "junior",
        }
    }
}

impl Seniority {
    /// Lenient mapping from a free-form label, e.g. out of an LLM reply.
    pub fn parse(label: &str) -> Option<Seniority> {
        let label = normalize(label);
        if label.contains("semi") || label.contains("ssr") || label.contains("mid") {
            Some(Seniority::SemiSenior)
        } else if label.contains("senior") || label.contains("sr") {
            Some(Seniority::Senior)
        } else if label.contains("junior")
            || label.contains("jr")
            || label.contains("trainee")
            || label.contains("estudiante")
            || label.contains("student")
        {
            Some(Seniority::Junior)
        } else {
            None
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Classifier {
    pub fn classify_industry<'a>(
        &self,
        text: &str,
        industries: &'a [CatalogEntry],
    ) -> Option<&'a CatalogEntry> {
        self.best_catalog_match(text, industries, self.cfg.industry_keyword_groups)
    }

    pub fn classify_role<'a>(
        &self,
        text: &str,
        roles: &'a [CatalogEntry],
    ) -> Option<&'a CatalogEntry> {
        self.best_catalog_match(text, roles, self.cfg.role_keyword_groups)
    }

    /// Scores every entry against the text and returns the strict winner.
    ///
    /// Entry score = 10 per occurrence of the entry's normalized name, plus
    /// one per occurrence of each keyword from the first keyword group whose
    /// trigger appears in the entry's own name. Entries are visited in
    /// alphabetical order of normalized name, so ties break alphabetically.
    fn best_catalog_match<'a>(
        &self,
        text: &str,
        entries: &'a [CatalogEntry],
        groups: &[KeywordGroup],
    ) -> Option<&'a CatalogEntry> {
        let text_norm = normalize(text);
        let mut ordered: Vec<(String, &CatalogEntry)> = entries
            .iter()
            .map(|e| (normalize(&e.name), e))
            .collect();
        ordered.sort_by(|a, b| a.0.cmp(&b.0));

        let mut best: Option<&CatalogEntry> = None;
        let mut max_score = 0usize;
        for (name_norm, entry) in &ordered {
            if name_norm.is_empty() {
                continue;
            }
            let mut score = count_occurrences(&text_norm, name_norm) * 10;
            if let Some(group) = groups
                .iter()
                .find(|g| g.triggers.iter().any(|t| name_norm.contains(t)))
            {
                score += group
                    .keywords
                    .iter()
                    .map(|kw| count_occurrences(&text_norm, kw))
                    .sum::<usize>();
            }
            if score > max_score {
                best = Some(entry);
                max_score = score;
            }
        }
        best
    }

    /// Explicit keyword evidence wins, checked senior -> semi-senior ->
    /// junior; otherwise thresholds on the extracted years apply.
    pub fn classify_seniority(&self, text: &str, years: u32) -> Seniority {
        let text_lower = text.to_lowercase();
        let ladders = [
            (&self.senior_res, Seniority::Senior),
            (&self.semi_senior_res, Seniority::SemiSenior),
            (&self.junior_res, Seniority::Junior),
        ];
        for (patterns, level) in ladders {
            if patterns.iter().any(|re| re.is_match(&text_lower)) {
                return level;
            }
        }
        if years >= self.cfg.senior_min_years {
            Seniority::Senior
        } else if years >= self.cfg.semi_senior_min_years {
            Seniority::SemiSenior
        } else {
            Seniority::Junior
        }
    }

    /// Maps years of experience onto the first seniority-level band that
    /// contains it, lowest band first. An open-ended band has no max.
    pub fn seniority_level_for_years<'a>(
        &self,
        years: u32,
        levels: &'a [SeniorityLevelEntry],
    ) -> Option<&'a SeniorityLevelEntry> {
        let years = years as i32;
        let mut ordered: Vec<&SeniorityLevelEntry> = levels.iter().collect();
        ordered.sort_by_key(|l| l.min_years);
        ordered
            .into_iter()
            .find(|l| l.min_years <= years && l.max_years.is_none_or(|max| max >= years))
    }

    /// Whole-word matches of catalog skill names, deduplicated.
    pub fn extract_skills<'a>(
        &self,
        text: &str,
        skills: &'a [CatalogEntry],
    ) -> Vec<&'a CatalogEntry> {
        let text_norm = normalize(text);
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for skill in skills {
            let name_norm = normalize(&skill.name);
            if name_norm.is_empty() || !seen.insert(name_norm.clone()) {
                continue;
            }
            if word_match(&text_norm, &name_norm) {
                found.push(skill);
            }
        }
        found
    }

    /// Languages match by name, ISO code, or any known synonym variant.
    pub fn extract_languages<'a>(
        &self,
        text: &str,
        languages: &'a [LanguageEntry],
    ) -> Vec<&'a LanguageEntry> {
        let text_norm = normalize(text);
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for lang in languages {
            let name_norm = normalize(&lang.name);
            if name_norm.is_empty() || !seen.insert(name_norm.clone()) {
                continue;
            }
            let iso_norm = lang.iso_code.as_deref().map(normalize);
            let mut hit = word_match(&text_norm, &name_norm)
                || iso_norm
                    .as_deref()
                    .is_some_and(|code| !code.is_empty() && word_match(&text_norm, code));
            if !hit {
                if let Some(variants) = self
                    .cfg
                    .language_synonyms
                    .iter()
                    .find(|group| group.contains(&name_norm.as_str()))
                {
                    hit = variants.iter().any(|v| word_match(&text_norm, v));
                }
            }
            if hit {
                found.push(lang);
            }
        }
        found
    }
}

fn count_occurrences(text: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    text.matches(needle).count()
}

/// Whole-word substring test; catalog names are escaped, so punctuation in
/// names like "node.js" matches literally. A name the regex engine cannot
/// express is treated as a miss.
fn word_match(text: &str, name: &str) -> bool {
    match Regex::new(&format!(r"\b{}\b", regex::escape(name))) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::classifier::config::ClassifierConfig;
    use crate::prelude::Result;

    fn classifier() -> Result<Classifier> {
        Classifier::new(ClassifierConfig::default())
    }

    fn entries(names: &[&str]) -> Vec<CatalogEntry> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| CatalogEntry {
                id: i as i32 + 1,
                name: n.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_industry_keyword_bonus() -> Result<()> {
        let industries = entries(&["Salud", "Tecnología"]);
        let text = "Desarrollo web con python y javascript, programacion de sistemas";
        let best = classifier()?.classify_industry(text, &industries);
        assert_eq!(best.map(|e| e.name.as_str()), Some("Tecnología"));
        Ok(())
    }

    #[test]
    fn test_no_evidence_classifies_nothing() -> Result<()> {
        let industries = entries(&["Salud", "Tecnología"]);
        assert_eq!(classifier()?.classify_industry("hello world", &industries), None);
        assert_eq!(classifier()?.classify_industry("whatever", &[]), None);
        Ok(())
    }

    #[test]
    fn test_classification_tie_breaks_alphabetically() -> Result<()> {
        // both names occur exactly once; neither trips a keyword group
        let roles = entries(&["Vendedor", "Contador"]);
        let text = "trabajo como vendedor y contador";
        let best = classifier()?.classify_role(text, &roles);
        assert_eq!(best.map(|e| e.name.as_str()), Some("Contador"));
        Ok(())
    }

    #[test]
    fn test_accented_names_match_ascii_text() -> Result<()> {
        let industries = entries(&["Educación"]);
        let text = "docente universitario, educacion a distancia";
        let best = classifier()?.classify_industry(text, &industries);
        assert_eq!(best.map(|e| e.name.as_str()), Some("Educación"));
        Ok(())
    }

    #[test]
    fn test_seniority_keyword_overrides_years() -> Result<()> {
        let c = classifier()?;
        assert_eq!(
            c.classify_seniority("Senior Backend Developer", 0),
            Seniority::Senior
        );
        Ok(())
    }

    #[test]
    fn test_seniority_falls_back_to_years() -> Result<()> {
        let c = classifier()?;
        assert_eq!(c.classify_seniority("worked on stuff", 0), Seniority::Junior);
        assert_eq!(c.classify_seniority("worked on stuff", 3), Seniority::SemiSenior);
        assert_eq!(c.classify_seniority("worked on stuff", 6), Seniority::Senior);
        Ok(())
    }

    #[test]
    fn test_skills_match_whole_words_only() -> Result<()> {
        let skills = entries(&["Java", "JavaScript", "SQL"]);
        let found = classifier()?.extract_skills("javascript and sql daily", &skills);
        let names: Vec<&str> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["JavaScript", "SQL"]);
        Ok(())
    }

    #[test]
    fn test_skills_extraction_is_idempotent() -> Result<()> {
        let skills = entries(&["Python", "Docker"]);
        let c = classifier()?;
        let first: Vec<i32> = c
            .extract_skills("python, docker, python", &skills)
            .iter()
            .map(|s| s.id)
            .collect();
        let second: Vec<i32> = c
            .extract_skills("python, docker, python", &skills)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![1, 2]);
        Ok(())
    }

    #[test]
    fn test_language_synonyms_resolve_to_one_entry() -> Result<()> {
        let languages = vec![
            LanguageEntry {
                id: 1,
                name: "Español".into(),
                iso_code: Some("es".into()),
            },
            LanguageEntry {
                id: 2,
                name: "Inglés".into(),
                iso_code: Some("en".into()),
            },
        ];
        let found = classifier()?.extract_languages("castellano nativo", &languages);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
        Ok(())
    }

    #[test]
    fn test_language_iso_code_match() -> Result<()> {
        let languages = vec![LanguageEntry {
            id: 1,
            name: "Inglés".into(),
            iso_code: Some("en".into()),
        }];
        let found = classifier()?.extract_languages("idiomas: en avanzado", &languages);
        assert_eq!(found.len(), 1);
        Ok(())
    }

    #[test]
    fn test_seniority_parse_prefers_semi() -> Result<()> {
        assert_eq!(Seniority::parse("Semi-Senior"), Some(Seniority::SemiSenior));
        assert_eq!(Seniority::parse("Senior"), Some(Seniority::Senior));
        assert_eq!(Seniority::parse("Estudiante"), Some(Seniority::Junior));
        assert_eq!(Seniority::parse("Director"), None);
        Ok(())
    }

    #[test]
    fn test_seniority_level_bands() -> Result<()> {
        let levels = vec![
            SeniorityLevelEntry {
                id: 1,
                name: "Junior".into(),
                min_years: 0,
                max_years: Some(2),
            },
            SeniorityLevelEntry {
                id: 2,
                name: "Senior".into(),
                min_years: 5,
                max_years: None,
            },
            SeniorityLevelEntry {
                id: 3,
                name: "Semi-Senior".into(),
                min_years: 3,
                max_years: Some(4),
            },
        ];
        let c = classifier()?;
        assert_eq!(c.seniority_level_for_years(1, &levels).map(|l| l.id), Some(1));
        assert_eq!(c.seniority_level_for_years(4, &levels).map(|l| l.id), Some(3));
        assert_eq!(c.seniority_level_for_years(12, &levels).map(|l| l.id), Some(2));
        Ok(())
    }
}
