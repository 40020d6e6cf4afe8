// lib/src/storage_engine/inmemory_storage.rs

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use models::errors::{TrialError, TrialResult};
use models::{ParticipantRecord, TrialFilters};

use super::seed::seed_records;
use super::storage_engine::TrialStore;
use super::storage_utils::load_dataset_file;
use crate::query_engine::filter_records;

/// Immutable in-memory record store. Cloning shares the underlying records.
#[derive(Debug, Clone)]
pub struct InMemoryTrialStore {
    records: Arc<Vec<ParticipantRecord>>,
    index: Arc<HashMap<String, usize>>,
}

impl InMemoryTrialStore {
    pub fn new(records: Vec<ParticipantRecord>) -> TrialResult<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.patient_id.to_string(), position).is_some() {
                return Err(TrialError::DuplicatePatientId(record.patient_id.to_string()));
            }
        }
        Ok(InMemoryTrialStore {
            records: Arc::new(records),
            index: Arc::new(index),
        })
    }

    /// Store over the bundled mock dataset.
    pub fn seeded() -> TrialResult<Self> {
        Self::new(seed_records()?)
    }

    pub fn from_dataset_file(path: &Path) -> TrialResult<Self> {
        Self::new(load_dataset_file(path)?)
    }

    pub fn records(&self) -> &[ParticipantRecord] {
        &self.records
    }
}

#[async_trait]
impl TrialStore for InMemoryTrialStore {
    fn get_type(&self) -> &'static str {
        "InMemory"
    }

    async fn all_records(&self) -> TrialResult<Vec<ParticipantRecord>> {
        Ok(self.records.as_ref().clone())
    }

    async fn get_record(&self, patient_id: &str) -> TrialResult<Option<ParticipantRecord>> {
        Ok(self.index.get(patient_id).map(|&position| self.records[position].clone()))
    }

    async fn len(&self) -> TrialResult<usize> {
        Ok(self.records.len())
    }

    async fn query(&self, filters: &TrialFilters) -> TrialResult<Vec<ParticipantRecord>> {
        Ok(filter_records(&self.records, filters).into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Treatment;

    #[tokio::test]
    async fn should_look_up_records_by_id() {
        let store = InMemoryTrialStore::seeded().unwrap();
        let record = store.get_record("P004").await.unwrap().unwrap();
        assert_eq!(record.patient_id, "P004");
        assert!(store.get_record("P999").await.unwrap().is_none());
        assert_eq!(store.len().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn should_reject_duplicate_ids() {
        let mut records = seed_records().unwrap();
        records.push(records[2].clone());
        let err = InMemoryTrialStore::new(records).unwrap_err();
        assert!(matches!(err, TrialError::DuplicatePatientId(id) if id == "P003"));
    }

    #[tokio::test]
    async fn should_query_in_store_order() {
        let store = InMemoryTrialStore::seeded().unwrap();
        let filters = TrialFilters { treatment: Some(Treatment::Placebo), ..Default::default() };
        let ids: Vec<String> = store
            .query(&filters)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.patient_id.to_string())
            .collect();
        assert_eq!(ids, vec!["P002", "P005", "P008"]);
    }

    #[tokio::test]
    async fn should_hand_out_copies() {
        let store = InMemoryTrialStore::seeded().unwrap();
        let mut copy = store.get_record("P001").await.unwrap().unwrap();
        copy.randomization.center = "Elsewhere".to_string();
        let original = store.get_record("P001").await.unwrap().unwrap();
        assert_eq!(original.center(), "City Hospital");
    }
}
