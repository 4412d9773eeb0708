//! Reasoning-model completion abstraction for quotepilot.
//!
//! This crate provides a unified interface for sending a single
//! system + user prompt pair to a text-completion service:
//! - `OpenAiBackend` speaking the OpenAI-compatible chat completions API (native)
//! - any in-process implementation of [`CompletionBackend`] (tests, offline runs)

mod backend;
mod error;
mod request;

pub use backend::CompletionBackend;
pub use error::CompletionError;
pub use request::{Completion, CompletionRequest};

#[cfg(feature = "http")]
pub use backend::openai::{OpenAiBackend, DEFAULT_ENDPOINT};

/// Result type for completion operations.
pub type Result<T> = std::result::Result<T, CompletionError>;
