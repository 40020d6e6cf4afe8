// lib/src/storage_engine/storage_utils.rs

use log::info;
use std::fs;
use std::path::Path;

use models::errors::{TrialError, TrialResult};
use models::{ParticipantRecord, RecordSet};

/// Helper to serialize a record to bytes. Stored values keep the JSON wire contract.
pub fn serialize_record(record: &ParticipantRecord) -> TrialResult<Vec<u8>> {
    serde_json::to_vec(record).map_err(|e| TrialError::SerializationError(e.to_string()))
}

/// Helper to deserialize bytes to a record.
pub fn deserialize_record(bytes: &[u8]) -> TrialResult<ParticipantRecord> {
    serde_json::from_slice(bytes).map_err(|e| TrialError::DeserializationError(e.to_string()))
}

/// Big-endian sequence key, so sled's byte ordering is insertion order.
pub fn record_key(sequence: u64) -> [u8; 8] {
    sequence.to_be_bytes()
}

/// Reads and validates a versioned dataset file.
pub fn load_dataset_file(path: &Path) -> TrialResult<Vec<ParticipantRecord>> {
    let content = fs::read_to_string(path).map_err(|e| {
        TrialError::StorageError(format!("Failed to read dataset file {}: {}", path.display(), e))
    })?;
    let records = RecordSet::from_json(&content)?.into_records();
    info!("Loaded {} participant records from {}", records.len(), path.display());
    Ok(records)
}
