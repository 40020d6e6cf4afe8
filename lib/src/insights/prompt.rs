// lib/src/insights/prompt.rs

//! Summary request payloads and the prompt text built from them.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use models::errors::{TrialError, TrialResult};
use models::{ParticipantRecord, TrialFilters};

use crate::query_engine::filters_from_json;

/// Instructions sent as the system message ahead of every prompt.
pub const SYSTEM_PROMPT: &str = "You are an AI assistant specializing in summarizing clinical trial data. \
Your summary should be concise and highlight key findings.";

const NO_FILTERS_DATASET: &str = "No filters applied. Summarizing dataset for the current study.";

/// Incoming summarize request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<TrialFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_id: Option<String>,
}

impl SummaryRequest {
    /// Reads a request body without rejecting it over a bad filter value.
    /// Only a body that is not a JSON object is an error.
    pub fn from_json(value: &Value) -> TrialResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| TrialError::InvalidData("request body must be a JSON object".to_string()))?;
        let filters = object
            .get("filters")
            .map(filters_from_json)
            .filter(|filters| !filters.is_empty());

        Ok(SummaryRequest {
            filters,
            patient_id: text_field(object, "patientId"),
            study_id: text_field(object, "studyId"),
        })
    }

    /// The patient to summarize. An empty id means the dataset.
    pub fn target_patient(&self) -> Option<&str> {
        self.patient_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The filters, if any criterion is actually present.
    pub fn active_filters(&self) -> Option<&TrialFilters> {
        self.filters.as_ref().filter(|filters| !filters.is_empty())
    }

    pub fn study_context(&self) -> Option<String> {
        self.study_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("Study ID: {}", id))
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => {
            warn!("Ignoring non-string {} {}", key, other);
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// The assembled prompt inputs. Exactly one of `patient_data` and
/// `filtered_trial_data` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_trial_data: Option<String>,
    pub filters_applied: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_context: Option<String>,
}

impl PromptInput {
    /// Payload describing a single patient, with the dashboard filters as context.
    pub fn for_patient(record: &ParticipantRecord, request: &SummaryRequest) -> TrialResult<Self> {
        let mut filters_applied = format!("Summarizing specific patient: {}.", record.patient_id);
        match request.active_filters() {
            Some(filters) => {
                filters_applied.push_str(&format!(" Current dashboard filters for context: {}", filters))
            }
            None => filters_applied.push_str(" No additional dashboard filters active."),
        }

        Ok(PromptInput {
            patient_data: Some(serde_json::to_string_pretty(record)?),
            filtered_trial_data: None,
            filters_applied,
            study_context: request.study_context(),
        })
    }

    /// Payload describing a filtered dataset. At most `max_records` records
    /// are serialized.
    pub fn for_dataset(
        records: &[&ParticipantRecord],
        request: &SummaryRequest,
        max_records: usize,
    ) -> TrialResult<Self> {
        let sample = &records[..records.len().min(max_records)];
        let filters_applied = match request.active_filters() {
            Some(filters) => format!("Filters Applied to Dataset: {}", filters),
            None => NO_FILTERS_DATASET.to_string(),
        };

        Ok(PromptInput {
            patient_data: None,
            filtered_trial_data: Some(serde_json::to_string_pretty(sample)?),
            filters_applied,
            study_context: request.study_context(),
        })
    }

    /// Renders the user prompt.
    pub fn render(&self) -> String {
        let mut prompt = String::new();
        if let Some(context) = &self.study_context {
            prompt.push_str(&format!("Current Study Context: {}\n\n", context));
        }

        match (&self.patient_data, &self.filtered_trial_data) {
            (Some(patient), _) => {
                prompt.push_str("Based on the following specific patient data, provide a summary.\n");
                prompt.push_str(
                    "Include key demographic characteristics (age, gender, age group), their assigned \
                     treatment, PGA status, notable adverse events (especially severe or related), and \
                     any significant baseline characteristics or vital signs if remarkable.\n",
                );
                prompt.push_str("Patient Data (JSON):\n");
                prompt.push_str(patient);
                prompt.push_str(&format!("\n\nContextual Information: {}\n", self.filters_applied));
            }
            (None, data) => {
                prompt.push_str(
                    "Based on the following clinical trial data (which may be a sample of a larger \
                     dataset) and the applied filters, provide a summary of key trends and insights.\n",
                );
                prompt.push_str("Consider:\n");
                prompt.push_str("- Demographic distributions (age groups, gender).\n");
                prompt.push_str("- Treatment group distributions and outcomes if discernible.\n");
                prompt.push_str("- Common or severe adverse events and their relationship to treatment if apparent.\n");
                prompt.push_str("- PGA score trends within the filtered dataset.\n");
                prompt.push_str(
                    "- Any notable patterns in baseline characteristics, study populations, VAS scores, \
                     or vital signs.\n\n",
                );
                prompt.push_str(&self.filters_applied);
                prompt.push_str("\n\nTrial Data (JSON array, sample might be truncated for brevity):\n");
                prompt.push_str(data.as_deref().unwrap_or("[]"));
                prompt.push('\n');
            }
        }

        prompt.push_str("\nProvide your summary:");
        prompt
    }
}
