//! Issuing-company name extraction.

use tracing::debug;

use super::patterns::{
    COMPANY_JP_PREFIXED, COMPANY_JP_SUFFIXED, COMPANY_LATIN_SUFFIXED, COMPANY_NOISE,
    FILE_EXTENSION, FILE_NAME_DATE, FILE_NAME_NOISE, FILE_NAME_SEPARATORS, ISSUER_LABEL,
    ISSUER_SHORT_LABEL, PARTY_LABEL,
};
use super::{ExtractionMatch, FieldExtractor};

/// Placeholder used when no company name can be derived.
pub const UNKNOWN_COMPANY: &str = "不明";

/// Longest accepted company name, in characters.
const MAX_NAME_CHARS: usize = 50;

/// Company name extractor.
///
/// Tries legal-entity markers first, then issuer/recipient labels.
pub struct CompanyNameExtractor;

impl CompanyNameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CompanyNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CompanyNameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        let rules = [
            (&*COMPANY_JP_PREFIXED, 0.9),
            (&*COMPANY_JP_SUFFIXED, 0.9),
            (&*COMPANY_LATIN_SUFFIXED, 0.85),
            (&*ISSUER_LABEL, 0.8),
            (&*ISSUER_SHORT_LABEL, 0.75),
            (&*PARTY_LABEL, 0.6),
        ];

        for (pattern, confidence) in rules {
            for caps in pattern.captures_iter(text) {
                let Some(name) = clean_candidate(&caps[1]) else {
                    continue;
                };
                if results.iter().any(|r| r.value == name) {
                    continue;
                }

                let full_match = caps.get(0).map(|m| (m.start(), m.end(), m.as_str()));
                let mut found = ExtractionMatch::new(name, confidence, full_match.map(|m| m.2).unwrap_or(""));
                if let Some((start, end, _)) = full_match {
                    found = found.with_position(start, end);
                }
                results.push(found);
            }
        }

        results
    }
}

/// Extract the issuing company name from text, falling back to the file name.
///
/// Never fails: returns [`UNKNOWN_COMPANY`] when nothing usable is found.
pub fn extract_company_name(text: &str, file_name: Option<&str>) -> String {
    if let Some(found) = CompanyNameExtractor::new().extract(text) {
        debug!("Company name '{}' from '{}' ({:.2})", found.value, found.source, found.confidence);
        return found.value;
    }

    file_name
        .map(clean_file_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}

/// Derive a company name from an uploaded file name.
///
/// Strips the extension, document-type words and date-like runs, then
/// collapses separators into single spaces.
pub fn clean_file_name(file_name: &str) -> String {
    let base = FILE_EXTENSION.replace(file_name, "");
    let base = FILE_NAME_NOISE.replace_all(&base, "");
    let base = FILE_NAME_DATE.replace_all(&base, "");
    let base = FILE_NAME_SEPARATORS.replace_all(&base, " ");
    let name = base.trim();

    if name.chars().count() > MAX_NAME_CHARS {
        String::new()
    } else {
        name.to_string()
    }
}

fn clean_candidate(raw: &str) -> Option<String> {
    let cleaned = COMPANY_NOISE.replace_all(raw, "");
    let cleaned = cleaned.trim().trim_matches(|c: char| c == ':' || c == '：' || c == ',');
    let cleaned = cleaned.trim();
    let len = cleaned.chars().count();

    (len > 0 && len <= MAX_NAME_CHARS).then(|| cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jp_prefixed_name() {
        assert_eq!(extract_company_name("請求元 株式会社Foo 御中", None), "Foo");
    }

    #[test]
    fn test_jp_suffixed_name() {
        assert_eq!(
            extract_company_name("テックソリューション株式会社\n東京都", None),
            "テックソリューション"
        );
    }

    #[test]
    fn test_latin_suffixed_name() {
        assert_eq!(
            extract_company_name("Bill from Acme Widgets, Inc. for services", None),
            "Acme Widgets"
        );
    }

    #[test]
    fn test_issuer_label() {
        assert_eq!(extract_company_name("発行者：山田商店\n合計 5000円", None), "山田商店");
    }

    #[test]
    fn test_latin_label_requires_colon() {
        assert_eq!(extract_company_name("Tokyo office", None), UNKNOWN_COMPANY);
        assert_eq!(extract_company_name("From: Blue Harbor Studio", None), "Blue Harbor Studio");
    }

    #[test]
    fn test_file_name_fallback() {
        assert_eq!(
            extract_company_name("no markers here", Some("請求書_サンプル商事_2024-01-15.pdf")),
            "サンプル商事"
        );
    }

    #[test]
    fn test_clean_file_name() {
        assert_eq!(clean_file_name("Invoice-blue_river-20240115.pdf"), "blue river");
        assert_eq!(clean_file_name("invoice.pdf"), "");
        assert_eq!(clean_file_name("見積書 2024/3/1.PDF"), "");
    }

    #[test]
    fn test_placeholder_when_nothing_found() {
        assert_eq!(extract_company_name("", None), UNKNOWN_COMPANY);
        assert_eq!(extract_company_name("", Some("invoice.pdf")), UNKNOWN_COMPANY);
    }

    #[test]
    fn test_extract_all_deduplicates() {
        let text = "株式会社Foo\n株式会社Foo\n株式会社Bar";
        let names: Vec<String> = CompanyNameExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(names, vec!["Foo".to_string(), "Bar".to_string()]);
    }
}
