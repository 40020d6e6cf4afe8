// lib/src/storage_engine/seed.rs

use models::errors::TrialResult;
use models::{ParticipantRecord, RecordSet};

/// The bundled mock dataset: ten participants across four trial centers.
pub const SEED_DATASET: &str = include_str!("../../data/seed_records.json");

pub fn seed_records() -> TrialResult<Vec<ParticipantRecord>> {
    Ok(RecordSet::from_json(SEED_DATASET)?.into_records())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Treatment;

    #[test]
    fn should_parse_seed_dataset() {
        let records = seed_records().unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].patient_id, "P001");
        assert_eq!(records[9].patient_id, "P010");
    }

    #[test]
    fn should_have_three_placebo_participants() {
        let records = seed_records().unwrap();
        let placebo = records.iter().filter(|r| r.treatment() == Treatment::Placebo).count();
        assert_eq!(placebo, 3);
    }
}
