//! Core library for quotepilot: invoice analysis and quote-partner matching.
//!
//! This crate provides:
//! - PDF text extraction and upload validation
//! - Field extraction from Japanese business documents, AI-first with an
//!   offline rule-based fallback
//! - Business category classification
//! - Company contact-method derivation and priority ranking
//! - Key/value persistence for invoices, companies and quote requests

pub mod error;
pub mod extraction;
pub mod matching;
pub mod models;
pub mod pdf;
pub mod store;
pub mod upload;

pub use error::{QuoteError, Result};
pub use extraction::{classify, AiExtractor, ExtractionOrchestrator, ExtractionOutcome, HeuristicExtractor};
pub use matching::{MatchingEngine, SearchOutcome, SearchQuery};
pub use models::{Category, Company, ContactMethod, ContactPriority, Invoice, QuotePilotConfig, QuoteRequest, QuoteStatus};
pub use pdf::{PdfTextExtractor, TextExtractor, UploadedFile};
pub use store::{CompanyRepository, InvoiceRepository, JsonFileStore, KvStore, MemoryStore, QuoteRequestRepository};
pub use upload::UploadService;

/// Re-export completion types.
pub use quotepilot_completion::{Completion, CompletionBackend, CompletionError, CompletionRequest};

#[cfg(feature = "http")]
pub use quotepilot_completion::OpenAiBackend;
