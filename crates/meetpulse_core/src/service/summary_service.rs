//! Summarization collaborator contract and unconfigured-mode fallback.
//!
//! # Responsibility
//! - Define the result shape the note-saving flow accepts summaries in.
//! - Provide the deterministic simulated summarizer used when no real
//!   collaborator is configured.
//!
//! # Invariants
//! - The simulated path behaves like the configured one from the
//!   caller's perspective: same result shape, a delay, never an error.
//! - Results enter notes only through the ordinary save path.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::thread;
use std::time::Duration;

/// Pause used by the simulated summarizer by default, mirroring the
/// latency of a real collaborator round-trip.
pub const SIMULATED_SUMMARY_DELAY: Duration = Duration::from_millis(1500);

/// Summary and action items produced for one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub action_items: Vec<String>,
}

/// Generic summarization failure.
#[derive(Debug)]
pub enum SummaryError {
    Generation(String),
}

impl Display for SummaryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generation(detail) => write!(f, "summary generation failed: {detail}"),
        }
    }
}

impl Error for SummaryError {}

/// Collaborator that turns a note's title and content into a summary
/// with action items.
pub trait Summarizer {
    fn summarize(&self, title: &str, content: &str) -> Result<SummaryResult, SummaryError>;
}

/// Deterministic fallback used when no real collaborator is configured.
///
/// Always returns the same canned result after the configured delay, so
/// the calling flow is exercised identically with and without a real
/// collaborator behind the trait.
#[derive(Debug, Clone)]
pub struct SimulatedSummarizer {
    delay: Duration,
}

impl SimulatedSummarizer {
    pub fn new() -> Self {
        Self {
            delay: SIMULATED_SUMMARY_DELAY,
        }
    }

    /// Overrides the simulated latency. Tests pass `Duration::ZERO`.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer for SimulatedSummarizer {
    fn summarize(&self, _title: &str, _content: &str) -> Result<SummaryResult, SummaryError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        Ok(SummaryResult {
            summary: "AI generation requires an API Key. This is a simulated summary \
                      showing that the system is ready to process your notes. The \
                      meeting focused on key project deliverables and timelines."
                .to_string(),
            action_items: vec![
                "Configure API Key in environment".to_string(),
                "Review project timelines".to_string(),
                "Schedule follow-up meeting".to_string(),
            ],
        })
    }
}
