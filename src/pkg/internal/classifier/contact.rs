use serde::Serialize;

use super::Classifier;

/// Contact fields pulled from the resume text. `None` means no pattern
/// matched, which is distinct from a matched-but-empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
}

impl Classifier {
    /// Applies the contact regex ladders in order; first pattern wins.
    pub fn extract_contact_info(&self, text: &str) -> ContactInfo {
        // flatten newlines so fields split across lines still match
        let text_clean = text.replace(['\n', '\r'], " ");

        let email = self
            .email_re
            .find(&text_clean)
            .map(|m| m.as_str().trim().to_string());

        let phone = self
            .phone_res
            .iter()
            .find_map(|re| re.find(&text_clean))
            .map(|m| m.as_str().trim().to_string());

        let linkedin_url = self
            .linkedin_re
            .find(&text_clean)
            .map(|m| m.as_str().trim().to_string());

        let github_url = self
            .github_re
            .find(&text_clean)
            .map(|m| m.as_str().trim().to_string());

        // known platforms are never a portfolio, skip to the next pattern
        let portfolio_url = self
            .portfolio_res
            .iter()
            .filter_map(|re| re.find(&text_clean))
            .find(|m| {
                let lower = m.as_str().to_lowercase();
                !self
                    .cfg
                    .portfolio_excludes
                    .iter()
                    .any(|excl| lower.contains(excl))
            })
            .map(|m| m.as_str().trim().to_string());

        ContactInfo {
            email,
            phone,
            linkedin_url,
            github_url,
            portfolio_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pkg::internal::classifier::{config::ClassifierConfig, Classifier};
    use crate::prelude::Result;

    fn classifier() -> Result<Classifier> {
        Classifier::new(ClassifierConfig::default())
    }

    #[test]
    fn test_email_extraction() -> Result<()> {
        let contact = classifier()?.extract_contact_info("Contact: jane.doe@example.com please");
        assert_eq!(contact.email.as_deref(), Some("jane.doe@example.com"));
        Ok(())
    }

    #[test]
    fn test_no_evidence_yields_none_not_empty() -> Result<()> {
        let contact = classifier()?.extract_contact_info("Hello world");
        assert_eq!(contact.email, None);
        assert_eq!(contact.phone, None);
        assert_eq!(contact.linkedin_url, None);
        assert_eq!(contact.github_url, None);
        assert_eq!(contact.portfolio_url, None);
        Ok(())
    }

    #[test]
    fn test_github_is_not_a_portfolio() -> Result<()> {
        let contact = classifier()?.extract_contact_info("https://github.com/janedoe");
        assert!(contact.github_url.is_some());
        assert_eq!(contact.portfolio_url, None);
        Ok(())
    }

    #[test]
    fn test_paraguay_phone_pattern_wins_over_generic() -> Result<()> {
        // both the national and the generic pattern could match here; the
        // ladder order pins the national one as the winner
        let contact = classifier()?.extract_contact_info("Tel: +595 981234567");
        assert_eq!(contact.phone.as_deref(), Some("+595 981234567"));
        Ok(())
    }

    #[test]
    fn test_portfolio_url_extraction() -> Result<()> {
        let contact = classifier()?.extract_contact_info("my site https://janedoe.dev/work");
        assert_eq!(
            contact.portfolio_url.as_deref(),
            Some("https://janedoe.dev/work")
        );
        Ok(())
    }

    #[test]
    fn test_contact_extraction_handles_multiline_input() -> Result<()> {
        let text = "Jane Doe\njane@\nexample.org";
        // the email is split across lines; flattening joins it with spaces,
        // so it must not produce a bogus match
        let contact = classifier()?.extract_contact_info(text);
        assert_eq!(contact.email, None);
        Ok(())
    }
}
