//! Error types for the quotepilot-core library.

use thiserror::Error;

/// Main error type for the quotepilot library.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// PDF text extraction error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// AI extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Upload rejected before any analysis ran.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Persistence error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Illegal quote request state change.
    #[error("transition error: {0}")]
    Transition(#[from] TransitionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the text-extraction collaborator.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised by the AI extraction adapter.
///
/// Never escapes the extraction orchestrator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The completion service could not be reached or answered with an error.
    #[error("completion transport failed: {0}")]
    Transport(String),

    /// The answer contained no parseable JSON object.
    #[error("no parseable JSON object in answer: {0}")]
    Unparseable(String),
}

/// Upload guard failures, raised before any extraction work begins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Content type is not accepted.
    #[error("only PDF files are supported (got {content_type})")]
    UnsupportedType { content_type: String },

    /// File exceeds the size ceiling.
    #[error("file size {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: u64, max: u64 },
}

/// Persistence errors. Not absorbed by this crate.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing medium failed.
    #[error("store backend failed: {0}")]
    Backend(String),

    /// A stored value could not be decoded.
    #[error("corrupt record at {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// A conditional write kept losing to concurrent writers.
    #[error("conditional write on {key} did not converge")]
    Conflict { key: String },

    /// The record id would collide with an index key or is empty.
    #[error("record id '{id}' is reserved")]
    ReservedId { id: String },

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A quote request state change that the lifecycle does not allow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot move quote request from {from} to {to}")]
pub struct TransitionError {
    pub from: &'static str,
    pub to: &'static str,
}

/// Result type for the quotepilot library.
pub type Result<T> = std::result::Result<T, QuoteError>;
