//! Date mention extraction.
//!
//! Dates are reported verbatim; no calendar validation or era conversion
//! is attempted.

use super::patterns::{DATE_ERA, DATE_MDY, DATE_YMD};
use super::{push_unique, ExtractionMatch, FieldExtractor};

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        // 2024年1月15日, 2024/01/15, 2024-1-15
        // 1/15/2024, 1月15日2024
        // 令和6年1月15日
        for (pattern, confidence) in [(&*DATE_YMD, 0.9), (&*DATE_MDY, 0.7), (&*DATE_ERA, 0.9)] {
            for found in pattern.find_iter(text) {
                if results.iter().any(|r| r.value == found.as_str()) {
                    continue;
                }
                results.push(
                    ExtractionMatch::new(found.as_str().to_string(), confidence, found.as_str())
                        .with_position(found.start(), found.end()),
                );
            }
        }

        results
    }
}

/// All distinct date mentions, in pattern order then text order.
pub fn extract_dates(text: &str) -> Vec<String> {
    let mut dates = Vec::new();
    for found in DateExtractor::new().extract_all(text) {
        push_unique(&mut dates, found.value);
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_common_formats() {
        let dates = extract_dates("発行日 2024年1月15日 / 支払期限 2024/02/29 / due 3/31/2024");
        assert_eq!(
            dates,
            vec![
                "2024年1月15日".to_string(),
                "2024/02/29".to_string(),
                "3/31/2024".to_string(),
            ]
        );
    }

    #[test]
    fn test_era_dates() {
        assert_eq!(extract_dates("令和6年4月1日 納品"), vec!["令和6年4月1日".to_string()]);
    }

    #[test]
    fn test_duplicates_removed() {
        assert_eq!(extract_dates("2024-01-15 と 2024-01-15"), vec!["2024-01-15".to_string()]);
    }

    #[test]
    fn test_no_dates() {
        assert!(extract_dates("").is_empty());
        assert!(extract_dates("合計 ¥50,000").is_empty());
    }
}
