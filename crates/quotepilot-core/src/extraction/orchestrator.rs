//! AI-first extraction with a guaranteed result.

use std::sync::Arc;

use quotepilot_completion::CompletionBackend;
use tracing::{info, warn};

use crate::error::PdfError;
use crate::models::Category;
use crate::pdf::{self, TextExtractor, UploadedFile};

use super::ai::{AiAnalysis, AiExtractor};

/// Result of analysing one document. Never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The AI adapter produced a structured answer.
    Success {
        extracted_text: String,
        analysis: AiAnalysis,
    },
    /// AI analysis was unavailable. Structured fields are at their defaults;
    /// `extracted_text` is whatever text extraction produced (possibly empty).
    Degraded { extracted_text: String, reason: String },
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success { .. })
    }

    pub fn extracted_text(&self) -> &str {
        match self {
            ExtractionOutcome::Success { extracted_text, .. } | ExtractionOutcome::Degraded { extracted_text, .. } => {
                extracted_text
            }
        }
    }

    /// Why analysis degraded, if it did.
    pub fn error(&self) -> Option<&str> {
        match self {
            ExtractionOutcome::Success { .. } => None,
            ExtractionOutcome::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn analysis(&self) -> Option<&AiAnalysis> {
        match self {
            ExtractionOutcome::Success { analysis, .. } => Some(analysis),
            ExtractionOutcome::Degraded { .. } => None,
        }
    }

    pub fn business_category(&self) -> Category {
        self.analysis().map(|a| a.business_category).unwrap_or_default()
    }

    pub fn services(&self) -> &[String] {
        self.analysis().map(|a| a.services.as_slice()).unwrap_or(&[])
    }

    pub fn total_amount(&self) -> u64 {
        self.analysis().map(|a| a.total_amount).unwrap_or(0)
    }
}

/// Runs text extraction, then AI analysis, absorbing every failure.
///
/// Text extraction runs on tokio's blocking pool, so callers must be inside
/// a tokio runtime.
pub struct ExtractionOrchestrator<B, T> {
    text_extractor: Arc<T>,
    ai: Option<AiExtractor<B>>,
}

impl<B: CompletionBackend, T: TextExtractor + 'static> ExtractionOrchestrator<B, T> {
    pub fn new(text_extractor: T, ai: AiExtractor<B>) -> Self {
        Self {
            text_extractor: Arc::new(text_extractor),
            ai: Some(ai),
        }
    }

    /// Orchestrator that never calls a completion service.
    pub fn without_ai(text_extractor: T) -> Self {
        Self {
            text_extractor: Arc::new(text_extractor),
            ai: None,
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai.is_some()
    }

    pub async fn analyze_document(&self, file: &UploadedFile) -> ExtractionOutcome {
        let extracted_text = match self.extract_text(file).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Text extraction failed for {}: {}", file.file_name, e);
                return ExtractionOutcome::Degraded {
                    extracted_text: String::new(),
                    reason: format!("text extraction failed: {}", e),
                };
            }
        };

        let Some(ai) = &self.ai else {
            info!("AI analysis disabled, using heuristics for {}", file.file_name);
            return ExtractionOutcome::Degraded {
                extracted_text,
                reason: "AI analysis is disabled".to_string(),
            };
        };

        if extracted_text.trim().is_empty() {
            warn!("No text extracted from {}", file.file_name);
            return ExtractionOutcome::Degraded {
                extracted_text,
                reason: "no text could be extracted".to_string(),
            };
        }

        match ai.analyze(&extracted_text).await {
            Ok(analysis) => {
                info!(
                    "AI analysis of {}: company='{}', category={}",
                    file.file_name, analysis.company_name, analysis.business_category
                );
                ExtractionOutcome::Success { extracted_text, analysis }
            }
            Err(e) => {
                warn!("AI analysis failed for {}, degrading: {}", file.file_name, e);
                ExtractionOutcome::Degraded {
                    extracted_text,
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl<B, T: TextExtractor + 'static> ExtractionOrchestrator<B, T> {
    /// Run the synchronous extractor off the async workers. A panic inside
    /// the extractor becomes a `TextExtraction` error.
    async fn extract_text(&self, file: &UploadedFile) -> pdf::Result<String> {
        let extractor = Arc::clone(&self.text_extractor);
        let file = file.clone();

        match tokio::task::spawn_blocking(move || extractor.extract_text(&file)).await {
            Ok(result) => result,
            Err(e) => Err(PdfError::TextExtraction(format!("text extraction aborted: {}", e))),
        }
    }
}
