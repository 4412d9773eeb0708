//! Document field extraction.
//!
//! Two paths produce the same information:
//! - [`AiExtractor`] asks a reasoning model for a JSON object
//! - [`HeuristicExtractor`] runs the offline rule library in [`rules`]
//!
//! [`ExtractionOrchestrator`] tries the first and reports a degraded
//! outcome instead of failing; the invoice factory then falls back to the
//! second.

pub mod ai;
pub mod classifier;
pub mod heuristic;
pub mod orchestrator;
pub mod rules;

pub use ai::{AiAnalysis, AiExtractor};
pub use classifier::classify;
pub use heuristic::{HeuristicExtractor, HeuristicFindings};
pub use orchestrator::{ExtractionOrchestrator, ExtractionOutcome};
