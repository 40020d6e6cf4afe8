// models/src/record_set.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::{TrialError, TrialResult};
use crate::participant::ParticipantRecord;

/// The record schema version this build reads and writes.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// A versioned dataset: the on-disk contract for seed data and dataset files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSet {
    pub schema_version: u32,
    pub records: Vec<ParticipantRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<ParticipantRecord>) -> Self {
        RecordSet { schema_version: CURRENT_SCHEMA_VERSION, records }
    }

    /// Parses a JSON dataset, checking the schema version and id uniqueness.
    pub fn from_json(input: &str) -> TrialResult<Self> {
        let set: RecordSet = serde_json::from_str(input)?;
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> TrialResult<()> {
        if self.schema_version != CURRENT_SCHEMA_VERSION {
            return Err(TrialError::UnsupportedSchemaVersion {
                found: self.schema_version,
                expected: CURRENT_SCHEMA_VERSION,
            });
        }
        ensure_unique_ids(&self.records)
    }

    pub fn into_records(self) -> Vec<ParticipantRecord> {
        self.records
    }
}

/// Fails with `DuplicatePatientId` on the first repeated identifier.
pub fn ensure_unique_ids(records: &[ParticipantRecord]) -> TrialResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.patient_id.as_str()) {
            return Err(TrialError::DuplicatePatientId(record.patient_id.to_string()));
        }
    }
    Ok(())
}
