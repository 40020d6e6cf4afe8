// lib/src/insights/service.rs

use log::{debug, error, info};
use std::sync::Arc;

use super::errors::{SummaryError, SummaryResult};
use super::prompt::{PromptInput, SummaryRequest, SummaryResponse};
use super::summarizer::Summarizer;
use crate::config::DEFAULT_MAX_PROMPT_RECORDS;
use crate::query_engine::filter_records;
use crate::storage_engine::TrialStore;

/// Produces natural-language summaries of a filtered dataset or one patient.
#[derive(Debug, Clone)]
pub struct TrialInsightsService {
    store: Arc<dyn TrialStore>,
    summarizer: Arc<dyn Summarizer>,
    max_records: usize,
}

impl TrialInsightsService {
    pub fn new(store: Arc<dyn TrialStore>, summarizer: Arc<dyn Summarizer>) -> Self {
        TrialInsightsService { store, summarizer, max_records: DEFAULT_MAX_PROMPT_RECORDS }
    }

    /// Caps the number of records serialized into a dataset prompt.
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Assembles the prompt payload for a request. An unknown patient fails
    /// here, before any summarizer call.
    pub async fn build_prompt(&self, request: &SummaryRequest) -> SummaryResult<PromptInput> {
        match request.target_patient() {
            Some(patient_id) => {
                let record = self
                    .store
                    .get_record(patient_id)
                    .await?
                    .ok_or_else(|| SummaryError::PatientNotFound(patient_id.to_string()))?;
                Ok(PromptInput::for_patient(&record, request)?)
            }
            None => {
                let records = self.store.all_records().await?;
                let filters = request.filters.clone().unwrap_or_default();
                let matched = filter_records(&records, &filters);
                debug!(
                    "Summarizing {} of {} matching records",
                    matched.len().min(self.max_records),
                    matched.len()
                );
                Ok(PromptInput::for_dataset(&matched, request, self.max_records)?)
            }
        }
    }

    pub async fn summarize(&self, request: &SummaryRequest) -> SummaryResult<SummaryResponse> {
        let prompt = match self.build_prompt(request).await {
            Ok(prompt) => prompt,
            Err(e) => {
                info!("Summary request rejected: {}", e.detail());
                return Err(e);
            }
        };

        match self.summarizer.summarize(&prompt.render()).await {
            Ok(summary) => Ok(SummaryResponse { summary }),
            Err(e) => {
                error!("Summary generation failed: {}", e.detail());
                Err(e)
            }
        }
    }
}
