use std::collections::BTreeSet;

use super::Classifier;

impl Classifier {
    /// Scans the first 10 non-empty lines for something name-shaped and
    /// returns the first qualifying line, title-cased.
    pub fn extract_name(&self, text: &str) -> Option<String> {
        for line in text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take(10)
        {
            let words: Vec<&str> = line.split_whitespace().collect();
            if !(2..=4).contains(&words.len()) {
                continue;
            }
            if !(5..=50).contains(&line.chars().count()) {
                continue;
            }
            let all_alphabetic = words.iter().all(|w| {
                let stripped: String = w.chars().filter(|c| *c != '.' && *c != ',').collect();
                !stripped.is_empty() && stripped.chars().all(char::is_alphabetic)
            });
            if !all_alphabetic {
                continue;
            }
            let lower = line.to_lowercase();
            if self.cfg.name_denylist.iter().any(|kw| lower.contains(kw)) {
                continue;
            }
            // proper names are either fully uppercase or capitalized
            let fully_upper = line
                .chars()
                .filter(|c| c.is_alphabetic())
                .all(char::is_uppercase);
            let any_capitalized = words
                .iter()
                .any(|w| w.chars().next().is_some_and(char::is_uppercase));
            if fully_upper || any_capitalized {
                return Some(title_case(line));
            }
        }
        None
    }

    /// Best-effort years of experience, never negative.
    ///
    /// Explicit "N years of experience" phrases win, taking the maximum
    /// across all matches. Otherwise a span of 4-digit year tokens inside
    /// `[min_history_year, current_year]` is used; failing that, 0.
    pub fn extract_years_experience(&self, text: &str) -> u32 {
        let text_lower = text.to_lowercase();

        let mut max_years: u32 = 0;
        for re in &self.experience_res {
            for cap in re.captures_iter(&text_lower) {
                if let Some(n) = cap.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                    max_years = max_years.max(n);
                }
            }
        }
        if max_years > 0 {
            return max_years;
        }

        let years: BTreeSet<i32> = self
            .year_re
            .find_iter(text)
            .filter_map(|m| m.as_str().parse::<i32>().ok())
            .filter(|y| (self.cfg.min_history_year..=self.cfg.current_year).contains(y))
            .collect();
        if years.len() >= 2 {
            if let Some(earliest) = years.iter().next() {
                return (self.cfg.current_year - earliest).max(0) as u32;
            }
        }

        // student resumes legitimately carry no experience evidence
        if self
            .cfg
            .student_keywords
            .iter()
            .any(|kw| text_lower.contains(kw))
        {
            tracing::debug!("student indicators found, assuming zero experience");
        }
        0
    }
}

fn title_case(line: &str) -> String {
    line.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use crate::pkg::internal::classifier::{config::ClassifierConfig, Classifier};
    use crate::prelude::Result;

    fn classifier() -> Result<Classifier> {
        Classifier::new(ClassifierConfig::default())
    }

    #[test]
    fn test_name_from_uppercase_header() -> Result<()> {
        let text = "JANE MARIE DOE\nBackend Developer\njane@example.com";
        assert_eq!(
            classifier()?.extract_name(text).as_deref(),
            Some("Jane Marie Doe")
        );
        Ok(())
    }

    #[test]
    fn test_name_skips_section_headers() -> Result<()> {
        let text = "Curriculum Vitae\nJane Doe\nSkills: everything";
        assert_eq!(classifier()?.extract_name(text).as_deref(), Some("Jane Doe"));
        Ok(())
    }

    #[test]
    fn test_name_rejects_nonalphabetic_lines() -> Result<()> {
        let text = "12345 67890\n+595 981 234 567\ndev@example.com";
        assert_eq!(classifier()?.extract_name(text), None);
        Ok(())
    }

    #[test]
    fn test_name_only_looks_at_first_ten_lines() -> Result<()> {
        let mut lines = vec!["x"; 10];
        lines.push("Jane Doe");
        assert_eq!(classifier()?.extract_name(&lines.join("\n")), None);
        Ok(())
    }

    #[test]
    fn test_years_from_explicit_phrase() -> Result<()> {
        let c = classifier()?;
        assert_eq!(
            c.extract_years_experience("I have 5 years of experience in backend development"),
            5
        );
        assert_eq!(c.extract_years_experience("8 años de experiencia en sistemas"), 8);
        Ok(())
    }

    #[test]
    fn test_years_takes_maximum_across_matches() -> Result<()> {
        let text = "3 years of experience in QA, 7 años de experiencia en desarrollo";
        assert_eq!(classifier()?.extract_years_experience(text), 7);
        Ok(())
    }

    #[test]
    fn test_student_text_yields_zero() -> Result<()> {
        assert_eq!(
            classifier()?.extract_years_experience("Estudiante de 3er semestre"),
            0
        );
        Ok(())
    }

    #[test]
    fn test_years_fallback_from_date_span() -> Result<()> {
        let mut cfg = ClassifierConfig::default();
        cfg.current_year = 2026;
        let c = Classifier::new(cfg)?;
        let text = "Acme Corp 2015 - 2019\nGlobex 2020 - 2023";
        assert_eq!(c.extract_years_experience(text), 11);
        Ok(())
    }

    #[test]
    fn test_single_year_is_not_a_span() -> Result<()> {
        assert_eq!(classifier()?.extract_years_experience("Graduated in 2020"), 0);
        Ok(())
    }

    #[test]
    fn test_out_of_range_years_are_ignored() -> Result<()> {
        let mut cfg = ClassifierConfig::default();
        cfg.current_year = 2026;
        let c = Classifier::new(cfg)?;
        // 1985 predates the history window, 2099 is in the future
        assert_eq!(c.extract_years_experience("1985 2099"), 0);
        Ok(())
    }
}
