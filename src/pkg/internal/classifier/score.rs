//! Weighted multi-factor quality score.
//!
//! Pure function of the text plus previously extracted signals. Each
//! category produces a 0-100 sub-score which is then weighted; the result
//! is clamped to 100 and rounded to two decimals.

use super::catalog::{CatalogEntry, LanguageEntry};
use super::contact::ContactInfo;
use super::Classifier;

impl Classifier {
    pub fn score(
        &self,
        text: &str,
        contact: &ContactInfo,
        years: u32,
        skills: &[CatalogEntry],
        languages: &[LanguageEntry],
    ) -> f64 {
        let w = &self.cfg.weights;
        let text_lower = text.to_lowercase();

        let mut total = 0.0;
        total += contact_subscore(contact) / 100.0 * w.contact_completeness * 100.0;
        total += experience_subscore(years) / 100.0 * w.experience_years * 100.0;
        total += self.skills_subscore(&text_lower, skills.len()) / 100.0 * w.skills_relevance * 100.0;
        total += self.education_subscore(&text_lower) / 100.0 * w.education_level * 100.0;
        total += language_subscore(languages.len()) / 100.0 * w.language_skills * 100.0;
        total += self.certification_subscore(&text_lower) / 100.0 * w.certifications * 100.0;
        total += self.text_quality_subscore(text, &text_lower) / 100.0 * w.text_quality * 100.0;

        (total.min(100.0) * 100.0).round() / 100.0
    }

    /// Skill count at 8 points each, plus 5 per high-demand term present,
    /// capped at 100.
    fn skills_subscore(&self, text_lower: &str, skill_count: usize) -> f64 {
        let base = (skill_count as f64 * 8.0).min(100.0);
        let bonus = self
            .cfg
            .high_demand_skills
            .iter()
            .filter(|skill| text_lower.contains(*skill))
            .count() as f64
            * 5.0;
        (base + bonus).min(100.0)
    }

    /// Highest matching rank from the ordered education table.
    fn education_subscore(&self, text_lower: &str) -> f64 {
        let best = self
            .cfg
            .education_ranks
            .iter()
            .filter(|(keyword, _)| text_lower.contains(keyword))
            .map(|(_, rank)| *rank)
            .fold(0.0, f64::max);
        if best == 0.0 {
            self.cfg.education_default
        } else {
            best
        }
    }

    fn certification_subscore(&self, text_lower: &str) -> f64 {
        let count: usize = self
            .cfg
            .cert_keywords
            .iter()
            .map(|kw| text_lower.matches(kw).count())
            .sum();
        (count as f64 * 20.0).min(100.0)
    }

    /// Rough shape check: sensible length, recognizable sections, dates.
    fn text_quality_subscore(&self, text: &str, text_lower: &str) -> f64 {
        let mut score = 50.0;

        let length = text.trim().chars().count();
        if (300..=3000).contains(&length) {
            score += 20.0;
        } else if length < 100 {
            score -= 30.0;
        }

        let section_count = self
            .cfg
            .section_keywords
            .iter()
            .filter(|section| text_lower.contains(*section))
            .count();
        score += (section_count as f64 * 3.0).min(20.0);

        let date_count = self.date_re.find_iter(text_lower).count();
        score += (date_count as f64).min(10.0);

        score.min(100.0)
    }
}

fn contact_subscore(contact: &ContactInfo) -> f64 {
    let mut score = 0.0;
    if contact.email.is_some() {
        score += 30.0;
    }
    if contact.phone.is_some() {
        score += 25.0;
    }
    if contact.linkedin_url.is_some() {
        score += 25.0;
    }
    if contact.github_url.is_some() || contact.portfolio_url.is_some() {
        score += 20.0;
    }
    score
}

fn experience_subscore(years: u32) -> f64 {
    match years {
        0 => 20.0,
        1 => 40.0,
        2..=3 => 60.0,
        4..=7 => 85.0,
        _ => 100.0,
    }
}

fn language_subscore(count: usize) -> f64 {
    match count {
        0 => 30.0,
        1 => 50.0,
        2 => 75.0,
        _ => 100.0,
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

    fn skills(names: &[&str]) -> Vec<CatalogEntry> {
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
    fn test_score_of_empty_evidence() -> Result<()> {
        // contact 0, experience 20, skills 0, education default 30,
        // languages 30, certifications 0, text quality 20
        let c = classifier()?;
        let score = c.score("", &ContactInfo::default(), 0, &[], &[]);
        assert_eq!(score, 12.5);
        Ok(())
    }

    #[test]
    fn test_zero_years_band_contributes_four_points() -> Result<()> {
        let c = classifier()?;
        let at_zero = c.score("", &ContactInfo::default(), 0, &[], &[]);
        let at_one = c.score("", &ContactInfo::default(), 1, &[], &[]);
        // 0.20 * 20 = 4.0 at years=0, 0.20 * 40 = 8.0 at years=1
        assert_eq!(at_one - at_zero, 4.0);
        Ok(())
    }

    #[test]
    fn test_score_is_deterministic_and_bounded() -> Result<()> {
        let c = classifier()?;
        let text = "Experiencia en desarrollo web. Educacion: ingenieria informatica. \
                    Certificacion AWS, curso de docker. 2018 - 2024.";
        let contact = ContactInfo {
            email: Some("a@b.com".into()),
            phone: Some("0981 123 456".into()),
            linkedin_url: Some("linkedin.com/in/a".into()),
            github_url: Some("github.com/a".into()),
            portfolio_url: None,
        };
        let skills = skills(&["Python", "Docker", "PostgreSQL"]);
        let first = c.score(text, &contact, 6, &skills, &[]);
        let second = c.score(text, &contact, 6, &skills, &[]);
        assert_eq!(first, second);
        assert!((0.0..=100.0).contains(&first));
        Ok(())
    }

    #[test]
    fn test_score_is_rounded_to_two_decimals() -> Result<()> {
        let c = classifier()?;
        let score = c.score("curso curso curso", &ContactInfo::default(), 2, &[], &[]);
        assert_eq!((score * 100.0).fract(), 0.0);
        Ok(())
    }

    #[test]
    fn test_saturated_inputs_clamp_to_hundred() -> Result<()> {
        let c = classifier()?;
        let mut text = String::from("doctorado en informatica. ");
        for _ in 0..10 {
            text.push_str("certificacion curso bootcamp experiencia educacion skills 2020 ");
        }
        // bump the length into the preferred band
        while text.chars().count() < 300 {
            text.push_str("python javascript react aws docker kubernetes sql ");
        }
        let contact = ContactInfo {
            email: Some("a@b.com".into()),
            phone: Some("+595 981234567".into()),
            linkedin_url: Some("linkedin.com/in/a".into()),
            github_url: Some("github.com/a".into()),
            portfolio_url: Some("a.dev".into()),
        };
        let many: Vec<CatalogEntry> = (0..20)
            .map(|i| CatalogEntry {
                id: i,
                name: format!("skill-{i}"),
            })
            .collect();
        let langs = vec![
            LanguageEntry { id: 1, name: "Español".into(), iso_code: Some("es".into()) },
            LanguageEntry { id: 2, name: "Inglés".into(), iso_code: Some("en".into()) },
            LanguageEntry { id: 3, name: "Alemán".into(), iso_code: Some("de".into()) },
        ];
        let score = c.score(&text, &contact, 12, &many, &langs);
        assert!(score <= 100.0);
        assert!(score > 90.0);
        Ok(())
    }

    #[test]
    fn test_education_rank_table_is_ordered() -> Result<()> {
        let c = classifier()?;
        let with_phd = c.score("phd y licenciatura", &ContactInfo::default(), 0, &[], &[]);
        let with_lic = c.score("una licenciatura", &ContactInfo::default(), 0, &[], &[]);
        // phd outranks licenciatura: (100 - 70) * 0.15 = 4.5 points
        assert_eq!(with_phd - with_lic, 4.5);
        Ok(())
    }
}
