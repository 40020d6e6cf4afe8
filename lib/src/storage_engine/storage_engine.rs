// lib/src/storage_engine/storage_engine.rs

use async_trait::async_trait;
use std::fmt::Debug;

use models::errors::TrialResult;
use models::{ParticipantRecord, TrialFilters};

/// Read access to the participant records. Implementations never mutate a
/// record once stored and always return records in store order.
#[async_trait]
pub trait TrialStore: Send + Sync + Debug {
    fn get_type(&self) -> &'static str;

    async fn all_records(&self) -> TrialResult<Vec<ParticipantRecord>>;

    async fn get_record(&self, patient_id: &str) -> TrialResult<Option<ParticipantRecord>>;

    async fn len(&self) -> TrialResult<usize> {
        Ok(self.all_records().await?.len())
    }

    /// Records matching every present criterion, in store order.
    async fn query(&self, filters: &TrialFilters) -> TrialResult<Vec<ParticipantRecord>> {
        let records = self.all_records().await?;
        Ok(records.into_iter().filter(|record| filters.matches(record)).collect())
    }
}
