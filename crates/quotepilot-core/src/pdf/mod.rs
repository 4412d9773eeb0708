//! Uploaded documents and text extraction.

mod extractor;

use std::path::Path;

pub use extractor::PdfTextExtractor;

use crate::error::PdfError;

/// The only content type accepted by default.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Result type for text extraction.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A file as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its content type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(file_name, content_type_for(path), bytes))
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Content type implied by a file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => PDF_CONTENT_TYPE,
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Turns an uploaded file into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, file: &UploadedFile) -> Result<String>;
}

impl<F> TextExtractor for F
where
    F: Fn(&UploadedFile) -> Result<String> + Send + Sync,
{
    fn extract_text(&self, file: &UploadedFile) -> Result<String> {
        self(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("a/b/請求書.PDF")), PDF_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("scan.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let file = UploadedFile::from_path(&path).unwrap();
        assert_eq!(file.file_name, "invoice.pdf");
        assert_eq!(file.content_type, PDF_CONTENT_TYPE);
        assert_eq!(file.size(), 8);
    }

    #[test]
    fn test_closure_extractor() {
        let extractor = |file: &UploadedFile| -> Result<String> { Ok(format!("text of {}", file.file_name)) };
        let file = UploadedFile::new("a.pdf", PDF_CONTENT_TYPE, vec![]);
        assert_eq!(extractor.extract_text(&file).unwrap(), "text of a.pdf");
    }
}
