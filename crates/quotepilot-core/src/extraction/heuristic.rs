//! Deterministic, offline field extraction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Category;

use super::classifier::classify;
use super::rules::{extract_amount, extract_company_name, extract_contact_info, extract_dates, extract_services, ContactInfo};

/// Everything the rule library could find in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicFindings {
    pub company_name: String,
    /// Matched service labels; empty when none matched.
    pub services: Vec<String>,
    /// Total in yen, `0` when unknown.
    pub total_amount: u64,
    pub dates: Vec<String>,
    pub contact_info: ContactInfo,
    pub business_category: Category,
}

/// Rule-based extractor. Never fails.
#[derive(Debug, Clone, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract from document text alone.
    pub fn extract(&self, text: &str) -> HeuristicFindings {
        self.extract_with_file_name(text, None)
    }

    /// Extract from document text, using `file_name` as the company-name fallback.
    pub fn extract_with_file_name(&self, text: &str, file_name: Option<&str>) -> HeuristicFindings {
        let services = extract_services(text);
        let findings = HeuristicFindings {
            company_name: extract_company_name(text, file_name),
            total_amount: extract_amount(text),
            dates: extract_dates(text),
            contact_info: extract_contact_info(text),
            business_category: classify(text, &services),
            services,
        };

        debug!(
            "Heuristics: company='{}', services={}, amount={}, category={}",
            findings.company_name,
            findings.services.len(),
            findings.total_amount,
            findings.business_category
        );

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::rules::UNKNOWN_COMPANY;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input_defaults() {
        let findings = HeuristicExtractor::new().extract("");
        assert_eq!(
            findings,
            HeuristicFindings {
                company_name: UNKNOWN_COMPANY.to_string(),
                services: vec![],
                total_amount: 0,
                dates: vec![],
                contact_info: ContactInfo::default(),
                business_category: Category::Other,
            }
        );
    }

    #[test]
    fn test_binary_garbage_does_not_panic() {
        let garbage: String = (0u32..512).filter_map(char::from_u32).collect();
        let findings = HeuristicExtractor::new().extract(&garbage);
        assert!(Category::ALL.contains(&findings.business_category));
    }

    #[test]
    fn test_full_document() {
        let text = "株式会社Foo\n請求日 2024年3月1日\n品目: Web開発 一式\n合計 ¥300,000円\nbilling@foo.example.jp";
        let findings = HeuristicExtractor::new().extract(text);

        assert_eq!(findings.company_name, "Foo");
        assert!(findings.services.contains(&"Web開発".to_string()));
        assert_eq!(findings.total_amount, 300_000);
        assert_eq!(findings.dates, vec!["2024年3月1日".to_string()]);
        assert_eq!(findings.contact_info.emails, vec!["billing@foo.example.jp".to_string()]);
        assert_eq!(findings.business_category, Category::ItSystems);
    }

    #[test]
    fn test_file_name_fallback() {
        let findings = HeuristicExtractor::new().extract_with_file_name("", Some("invoice_ミナト企画.pdf"));
        assert_eq!(findings.company_name, "ミナト企画");
    }
}
