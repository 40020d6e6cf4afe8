// lib/src/lib.rs

//! Core of the clinical-trial record service: configuration, record stores,
//! filtering, option lists, distributions, VAS timelines and AI summaries.

pub mod analytics;
pub mod config;
pub mod insights;
pub mod query_engine;
pub mod storage_engine;

pub use models::{
    ParticipantRecord, PatientId, RecordSet, TrialError, TrialFilters, TrialResult,
};
