// lib/src/query_engine/mod.rs

pub mod options;
pub mod params;

pub use options::{
    adverse_event_options, age_group_options, center_options, gender_options, options_for,
    pga_score_options, treatment_options, FilterField, FilterOptions,
};
pub use params::{filters_from_json, filters_from_query};

use models::{ParticipantRecord, TrialFilters};

/// Stable filter: the records satisfying every present criterion, in input order.
pub fn filter_records<'a>(
    records: &'a [ParticipantRecord],
    filters: &TrialFilters,
) -> Vec<&'a ParticipantRecord> {
    records.iter().filter(|record| filters.matches(record)).collect()
}
