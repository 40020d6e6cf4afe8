// lib/src/insights/mod.rs

pub mod errors;
pub mod prompt;
pub mod service;
pub mod summarizer;

pub use errors::{SummaryError, SummaryResult};
pub use prompt::{PromptInput, SummaryRequest, SummaryResponse, SYSTEM_PROMPT};
pub use service::TrialInsightsService;
pub use summarizer::{build_summarizer, DisabledSummarizer, OpenAiSummarizer, Summarizer};
