// models/src/lib.rs

pub mod enums;
pub mod errors;
pub mod filters;
pub mod identifiers;
pub mod participant;
pub mod record_set;

pub use enums::{AeRelationship, AeSeverity, AgeGroup, Gender, Treatment, WorkStatus};
pub use errors::{TrialError, TrialResult, ValidationError};
pub use filters::TrialFilters;
pub use identifiers::PatientId;
pub use participant::{
    AdverseEvent, BaselineCharacteristics, Demographics, GlobalAssessment, ParticipantRecord,
    Randomization, StudyPopulations, VasDataPoint, VitalSigns,
};
pub use record_set::{RecordSet, CURRENT_SCHEMA_VERSION};
