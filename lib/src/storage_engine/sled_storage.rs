// lib/src/storage_engine/sled_storage.rs

use async_trait::async_trait;
use log::{debug, info};
use sled::transaction::{ConflictableTransactionResult, TransactionError};
use sled::Transactional;
use std::path::{Path, PathBuf};

use models::errors::{TrialError, TrialResult};
use models::record_set::ensure_unique_ids;
use models::ParticipantRecord;

use super::storage_engine::TrialStore;
use super::storage_utils::{deserialize_record, record_key, serialize_record};

const RECORDS_TREE: &str = "records";
const PATIENT_INDEX_TREE: &str = "patient_index";

/// Persistent record store backed by sled.
///
/// Records live in the `records` tree under big-endian sequence keys, so a
/// full scan returns them in import order. `patient_index` maps a patient id
/// to its sequence key.
#[derive(Debug, Clone)]
pub struct SledTrialStore {
    db: sled::Db,
    records: sled::Tree,
    patient_index: sled::Tree,
    path: PathBuf,
}

pub fn open_sled_db(path: &Path) -> TrialResult<sled::Db> {
    std::fs::create_dir_all(path).map_err(|e| {
        TrialError::StorageError(format!("Failed to create database directory at {:?}: {}", path, e))
    })?;
    Ok(sled::open(path)?)
}

impl SledTrialStore {
    pub fn open(path: &Path) -> TrialResult<Self> {
        let db = open_sled_db(path)?;
        let records = db.open_tree(RECORDS_TREE)?;
        let patient_index = db.open_tree(PATIENT_INDEX_TREE)?;
        info!("Opened sled trial store at {:?}", path);
        Ok(SledTrialStore { db, records, patient_index, path: path.to_path_buf() })
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the stored dataset with `records`, keeping their order. Both
    /// trees change in one transaction.
    pub async fn import(&self, records: &[ParticipantRecord]) -> TrialResult<usize> {
        ensure_unique_ids(records)?;

        let mut record_batch = sled::Batch::default();
        let mut index_batch = sled::Batch::default();
        for key in self.records.iter().keys() {
            record_batch.remove(key?);
        }
        for key in self.patient_index.iter().keys() {
            index_batch.remove(key?);
        }
        for (sequence, record) in records.iter().enumerate() {
            let key = record_key(sequence as u64);
            record_batch.insert(&key[..], serialize_record(record)?);
            index_batch.insert(record.patient_id.as_bytes(), &key[..]);
        }

        (&self.records, &self.patient_index)
            .transaction(|(records, patient_index)| -> ConflictableTransactionResult<(), TrialError> {
                records.apply_batch(&record_batch)?;
                patient_index.apply_batch(&index_batch)?;
                Ok(())
            })
            .map_err(|e| match e {
                TransactionError::Abort(e) => e,
                TransactionError::Storage(e) => {
                    TrialError::TransactionError(format!("Failed to replace participant records: {}", e))
                }
            })?;
        self.db.flush_async().await?;
        info!("Imported {} participant records into {:?}", records.len(), self.path);
        Ok(records.len())
    }
}

#[async_trait]
impl TrialStore for SledTrialStore {
    fn get_type(&self) -> &'static str {
        "Sled"
    }

    async fn all_records(&self) -> TrialResult<Vec<ParticipantRecord>> {
        let mut out = Vec::with_capacity(self.records.len());
        for entry in self.records.iter() {
            let (_, value) = entry?;
            out.push(deserialize_record(&value)?);
        }
        debug!("Scanned {} records from sled", out.len());
        Ok(out)
    }

    async fn get_record(&self, patient_id: &str) -> TrialResult<Option<ParticipantRecord>> {
        let Some(key) = self.patient_index.get(patient_id.as_bytes())? else {
            return Ok(None);
        };
        match self.records.get(&key)? {
            Some(value) => Ok(Some(deserialize_record(&value)?)),
            None => Err(TrialError::StorageError(format!(
                "Patient index points at a missing record for {}",
                patient_id
            ))),
        }
    }

    async fn len(&self) -> TrialResult<usize> {
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage_engine::seed::seed_records;
    use models::TrialFilters;
    use tempfile::TempDir;

    #[tokio::test]
    async fn should_preserve_import_order() {
        let dir = TempDir::new().unwrap();
        let store = SledTrialStore::open(dir.path()).unwrap();
        let mut records = seed_records().unwrap();
        records.reverse();
        assert_eq!(store.import(&records).await.unwrap(), 10);

        let stored: Vec<String> = store
            .all_records()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.patient_id.to_string())
            .collect();
        let expected: Vec<String> = records.iter().map(|r| r.patient_id.to_string()).collect();
        assert_eq!(stored, expected);
    }

    #[tokio::test]
    async fn should_look_up_and_filter_records() {
        let dir = TempDir::new().unwrap();
        let store = SledTrialStore::open(dir.path()).unwrap();
        store.import(&seed_records().unwrap()).await.unwrap();

        let record = store.get_record("P007").await.unwrap().unwrap();
        assert_eq!(record.pga_score(), 3);
        assert!(store.get_record("P999").await.unwrap().is_none());

        let filters = TrialFilters { pga_score: Some(3), ..Default::default() };
        let matched = store.query(&filters).await.unwrap();
        assert_eq!(matched.len(), 2);
    }

    #[tokio::test]
    async fn should_replace_previous_import() {
        let dir = TempDir::new().unwrap();
        let store = SledTrialStore::open(dir.path()).unwrap();
        let records = seed_records().unwrap();
        store.import(&records).await.unwrap();
        store.import(&records[..3]).await.unwrap();

        assert_eq!(store.len().await.unwrap(), 3);
        assert!(store.get_record("P010").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_reject_duplicate_ids_on_import() {
        let dir = TempDir::new().unwrap();
        let store = SledTrialStore::open(dir.path()).unwrap();
        let mut records = seed_records().unwrap();
        records.push(records[0].clone());
        assert!(matches!(store.import(&records).await, Err(TrialError::DuplicatePatientId(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn should_persist_across_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = SledTrialStore::open(dir.path()).unwrap();
            store.import(&seed_records().unwrap()).await.unwrap();
        }
        let reopened = SledTrialStore::open(dir.path()).unwrap();
        assert_eq!(reopened.len().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn should_keep_index_in_step_with_records() {
        let dir = TempDir::new().unwrap();
        let store = SledTrialStore::open(dir.path()).unwrap();
        let mut records = seed_records().unwrap();
        store.import(&records).await.unwrap();
        records.truncate(6);
        records.reverse();
        store.import(&records).await.unwrap();

        assert_eq!(store.patient_index.len(), store.records.len());
        for record in &records {
            let stored = store.get_record(&record.patient_id).await.unwrap().unwrap();
            assert_eq!(stored.patient_id, record.patient_id);
        }
        assert!(store.get_record("P007").await.unwrap().is_none());
    }
}
