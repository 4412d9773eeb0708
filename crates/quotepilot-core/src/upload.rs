//! Invoice upload: validate, analyse, build, persist.

use quotepilot_completion::CompletionBackend;
use tracing::{info, warn};

use crate::error::{Result, ValidationError};
use crate::extraction::ExtractionOrchestrator;
use crate::models::{Invoice, UploadConfig};
use crate::pdf::{TextExtractor, UploadedFile};
use crate::store::{InvoiceRepository, KvStore};

/// Reject files the pipeline must not see.
pub fn validate_upload(file: &UploadedFile, limits: &UploadConfig) -> std::result::Result<(), ValidationError> {
    let content_type = file
        .content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if !limits
        .allowed_content_types
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(&content_type))
    {
        return Err(ValidationError::UnsupportedType {
            content_type: file.content_type.clone(),
        });
    }

    if file.size() > limits.max_file_size {
        return Err(ValidationError::TooLarge {
            size: file.size(),
            max: limits.max_file_size,
        });
    }

    Ok(())
}

/// Upload pipeline.
///
/// Only validation and persistence errors reach the caller; analysis
/// problems degrade to the offline rules.
pub struct UploadService<B, T, S> {
    orchestrator: ExtractionOrchestrator<B, T>,
    invoices: InvoiceRepository<S>,
    limits: UploadConfig,
}

impl<B, T, S> UploadService<B, T, S>
where
    B: CompletionBackend,
    T: TextExtractor + 'static,
    S: KvStore,
{
    pub fn new(orchestrator: ExtractionOrchestrator<B, T>, invoices: InvoiceRepository<S>, limits: UploadConfig) -> Self {
        Self {
            orchestrator,
            invoices,
            limits,
        }
    }

    pub async fn upload(&self, file: &UploadedFile) -> Result<Invoice> {
        if let Err(e) = validate_upload(file, &self.limits) {
            warn!("Rejected {}: {}", file.file_name, e);
            return Err(e.into());
        }

        let outcome = self.orchestrator.analyze_document(file).await;
        let degraded = !outcome.is_success();
        let invoice = Invoice::from_outcome(file, outcome);

        self.invoices.save(&invoice)?;
        info!(
            "Stored invoice {} for {} (company '{}', category {}, degraded: {})",
            invoice.id,
            file.file_name,
            invoice.company_name,
            invoice.business_category.unwrap_or_default(),
            degraded
        );

        Ok(invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PDF_CONTENT_TYPE;

    fn limits() -> UploadConfig {
        UploadConfig::default()
    }

    #[test]
    fn test_accepts_pdf_with_parameters() {
        let file = UploadedFile::new("a.pdf", "Application/PDF; charset=binary", vec![0; 10]);
        assert_eq!(validate_upload(&file, &limits()), Ok(()));
    }

    #[test]
    fn test_rejects_other_types() {
        let file = UploadedFile::new("a.png", "image/png", vec![0; 10]);
        assert_eq!(
            validate_upload(&file, &limits()),
            Err(ValidationError::UnsupportedType {
                content_type: "image/png".to_string()
            })
        );
    }

    #[test]
    fn test_size_ceiling() {
        let max = limits().max_file_size as usize;
        let at_limit = UploadedFile::new("a.pdf", PDF_CONTENT_TYPE, vec![0; max]);
        assert!(validate_upload(&at_limit, &limits()).is_ok());

        let over = UploadedFile::new("a.pdf", PDF_CONTENT_TYPE, vec![0; max + 1]);
        assert!(matches!(validate_upload(&over, &limits()), Err(ValidationError::TooLarge { .. })));
    }
}
