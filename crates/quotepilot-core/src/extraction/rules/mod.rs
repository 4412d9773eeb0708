//! Rule-based field extractors for Japanese business documents.

pub mod amounts;
pub mod company;
pub mod contacts;
pub mod dates;
pub mod patterns;
pub mod services;

pub use amounts::{extract_amount, parse_yen_amount, AmountExtractor, MAX_PLAUSIBLE_AMOUNT, MIN_PLAUSIBLE_AMOUNT};
pub use company::{clean_file_name, extract_company_name, CompanyNameExtractor, UNKNOWN_COMPANY};
pub use contacts::{extract_contact_info, ContactInfo};
pub use dates::{extract_dates, DateExtractor};
pub use services::{extract_services, DEFAULT_SERVICE, SERVICE_LABELS};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Push `value` unless an equal value is already present.
///
/// Keeps first-seen order so results stay deterministic.
pub(crate) fn push_unique(values: &mut Vec<String>, value: impl Into<String>) {
    let value = value.into();
    if !values.contains(&value) {
        values.push(value);
    }
}
