// lib/src/insights/errors.rs

use models::errors::TrialError;
use thiserror::Error;

/// Outcome of a failed summarize call.
///
/// The display text of each variant is the message shown to dashboard users,
/// so it stays fixed. The payload carries detail for logs.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Error: Patient not found.")]
    PatientNotFound(String),
    #[error("Error: An exception occurred while generating the AI summary.")]
    Upstream(String),
    #[error("Error: AI failed to generate a summary.")]
    EmptyOutput,
    #[error("Error: {0}")]
    Storage(#[from] TrialError),
}

impl SummaryError {
    /// Diagnostic detail, for logs.
    pub fn detail(&self) -> String {
        match self {
            SummaryError::PatientNotFound(id) => format!("patient {} not found", id),
            SummaryError::Upstream(msg) => format!("summarization service failed: {}", msg),
            SummaryError::EmptyOutput => "summarization service returned no text".to_string(),
            SummaryError::Storage(e) => format!("record store failed: {}", e),
        }
    }
}

pub type SummaryResult<T> = Result<T, SummaryError>;
