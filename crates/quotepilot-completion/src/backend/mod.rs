//! Completion backend implementations.

#[cfg(feature = "http")]
pub mod openai;

use std::future::Future;

use crate::{Completion, CompletionRequest, Result};

/// Trait for text-completion backends.
///
/// This trait abstracts over the transport used to reach a reasoning model,
/// allowing the extraction pipeline to run against the real HTTP service or
/// an in-process stand-in.
pub trait CompletionBackend: Send + Sync {
    /// Send one request and wait for the complete answer.
    ///
    /// # Arguments
    /// * `request` - Model, prompts and sampling settings
    ///
    /// # Returns
    /// The model's free-form answer text
    fn complete(&self, request: &CompletionRequest) -> impl Future<Output = Result<Completion>> + Send;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str;
}
