//! PDF text extraction using lopdf and pdf-extract.

use std::panic;

use lopdf::Document;
use tracing::{debug, warn};

use super::{Result, TextExtractor, UploadedFile};
use crate::error::PdfError;

/// Text extractor for digital (non-scanned) PDFs.
///
/// lopdf validates the document and removes empty-password encryption;
/// pdf-extract then renders the text layer.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the text layer from raw PDF bytes.
    pub fn extract_from_bytes(&self, data: &[u8]) -> Result<String> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let text = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            render_text(&decrypted)?
        } else {
            render_text(data)?
        };

        let text = text.trim().to_string();
        debug!("Extracted {} chars from {} pages", text.chars().count(), page_count);
        Ok(text)
    }
}

/// Run pdf-extract over a document lopdf already accepted.
///
/// pdf-extract panics on some structurally valid documents (fonts without
/// a `/Subtype`, for one); those come back as `TextExtraction` errors.
fn render_text(data: &[u8]) -> Result<String> {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
        Ok(result) => result.map_err(|e| PdfError::TextExtraction(e.to_string())),
        Err(_) => {
            warn!("pdf-extract panicked while rendering the text layer");
            Err(PdfError::TextExtraction(
                "pdf text layer could not be rendered".to_string(),
            ))
        }
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, file: &UploadedFile) -> Result<String> {
        self.extract_from_bytes(&file.bytes)
    }
}
