//! Error types for the completion layer.

use thiserror::Error;

/// Errors that can occur while talking to a completion service.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The service did not answer within the configured timeout.
    #[error("completion request timed out after {0}s")]
    Timeout(u64),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered but carried no completion text.
    #[error("empty completion response")]
    EmptyResponse,

    /// No bearer credential was configured.
    #[error("API key is not configured")]
    MissingApiKey,
}
