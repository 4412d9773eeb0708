//! Yen amount extraction.

use regex::Regex;

use super::patterns::{AMOUNT_LABELLED, AMOUNT_MAN_SUFFIXED, AMOUNT_YEN_PREFIXED, AMOUNT_YEN_SUFFIXED};
use super::{ExtractionMatch, FieldExtractor};

/// Smallest amount accepted as a real invoice total (¥1,000).
pub const MIN_PLAUSIBLE_AMOUNT: u64 = 1_000;

/// Largest amount accepted as a real invoice total (¥10,000,000,000).
pub const MAX_PLAUSIBLE_AMOUNT: u64 = 10_000_000_000;

const MAN: u64 = 10_000;

/// Amount field extractor.
///
/// Patterns are tried in order: labelled totals, `¥`-prefixed numbers,
/// `万円` amounts, then bare `円`-suffixed numbers. Only amounts inside
/// the plausible range are reported.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    fn rules() -> [(&'static Regex, f32); 4] {
        [
            (&*AMOUNT_LABELLED, 0.95),
            (&*AMOUNT_YEN_PREFIXED, 0.85),
            (&*AMOUNT_MAN_SUFFIXED, 0.8),
            (&*AMOUNT_YEN_SUFFIXED, 0.6),
        ]
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<u64>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for (pattern, confidence) in Self::rules() {
            for caps in pattern.captures_iter(text) {
                let scaled = caps.get(2).is_some();
                let Some(amount) = parse_yen_amount(&caps[1], scaled) else {
                    continue;
                };
                if !(MIN_PLAUSIBLE_AMOUNT..=MAX_PLAUSIBLE_AMOUNT).contains(&amount) {
                    continue;
                }

                if let Some(full_match) = caps.get(0) {
                    results.push(
                        ExtractionMatch::new(amount, confidence, full_match.as_str())
                            .with_position(full_match.start(), full_match.end()),
                    );
                }
            }
        }

        results
    }
}

/// Extract the most likely invoice total, or `0` when none is plausible.
pub fn extract_amount(text: &str) -> u64 {
    AmountExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or(0)
}

/// Parse a yen literal such as `"1,234,000"` or `"1.5"` (with `man` set, ×10,000).
///
/// Thousands separators are dropped. Fractions are only meaningful for
/// `万` amounts and are truncated to whole yen.
pub fn parse_yen_amount(literal: &str, man: bool) -> Option<u64> {
    let cleaned: String = literal
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };
    if whole.is_empty() {
        return None;
    }

    let whole: u64 = whole.parse().ok()?;
    if !man {
        return Some(whole);
    }

    let mut amount = whole.checked_mul(MAN)?;
    let mut unit = MAN;
    for digit in fraction.chars().filter_map(|c| c.to_digit(10)) {
        unit /= 10;
        if unit == 0 {
            break;
        }
        amount = amount.checked_add(u64::from(digit) * unit)?;
    }

    Some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_total() {
        assert_eq!(extract_amount("合計：¥1,234,000円"), 1_234_000);
        assert_eq!(extract_amount("ご請求金額 (税込) ￥55,000"), 55_000);
    }

    #[test]
    fn test_man_scaling() {
        assert_eq!(extract_amount("50万円"), 500_000);
        assert_eq!(extract_amount("予算 1.5万円"), 15_000);
        assert_eq!(extract_amount("合計 30万円"), 300_000);
    }

    #[test]
    fn test_yen_prefixed() {
        assert_eq!(extract_amount("作業費 ¥300,000"), 300_000);
    }

    #[test]
    fn test_bare_yen_suffix_needs_six_chars() {
        assert_eq!(extract_amount("120,000円"), 120_000);
        assert_eq!(extract_amount("5000円"), 0);
    }

    #[test]
    fn test_implausible_amounts_skipped() {
        // Quantity next to the label is below the floor; the yen figure wins.
        assert_eq!(extract_amount("合計 3点 ¥45,000"), 45_000);
        assert_eq!(extract_amount("¥500"), 0);
        assert_eq!(extract_amount("¥99,999,999,999"), 0);
    }

    #[test]
    fn test_no_amount() {
        assert_eq!(extract_amount(""), 0);
        assert_eq!(extract_amount("\u{0}\u{1}binary\u{fffd}"), 0);
    }

    #[test]
    fn test_parse_yen_amount() {
        assert_eq!(parse_yen_amount("1,234", false), Some(1234));
        assert_eq!(parse_yen_amount("12", true), Some(120_000));
        assert_eq!(parse_yen_amount("2.25", true), Some(22_500));
        assert_eq!(parse_yen_amount(",", false), None);
        assert_eq!(parse_yen_amount("99999999999999999999999", false), None);
    }
}
