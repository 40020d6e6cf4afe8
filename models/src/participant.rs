// models/src/participant.rs

use serde::{Deserialize, Serialize};

use crate::enums::{AeRelationship, AeSeverity, AgeGroup, Gender, Treatment, WorkStatus};
use crate::identifiers::PatientId;

/// One trial participant. The JSON shape (camelCase field names, enum labels)
/// is the wire and storage contract shared by the store, the HTTP API and the
/// summary prompts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub patient_id: PatientId,
    pub demographics: Demographics,
    pub randomization: Randomization,
    pub study_populations: StudyPopulations,
    pub global_assessment: GlobalAssessment,
    pub baseline_characteristics: BaselineCharacteristics,
    #[serde(default)]
    pub ae_data: Vec<AdverseEvent>,
    #[serde(default)]
    pub vas_data: Vec<VasDataPoint>,
    #[serde(default)]
    pub vital_signs: VitalSigns,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub age: u32,
    pub age_group: AgeGroup,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Randomization {
    /// Trial center name.
    pub center: String,
    pub treatment: Treatment,
}

/// Intention-to-treat and per-protocol population membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPopulations {
    pub itt: bool,
    pub pp: bool,
}

/// Patient Global Assessment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalAssessment {
    pub pga_score: i32,
    pub pga_description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineCharacteristics {
    pub surgery_last_year: bool,
    pub work_status: WorkStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdverseEvent {
    /// Event name, e.g. "Headache".
    pub ae: String,
    pub ae_severity: AeSeverity,
    pub ae_relationship: AeRelationship,
}

/// A Visual Analog Scale pain score on a given study day.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VasDataPoint {
    pub day: i32,
    pub vas_score: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    /// Diastolic blood pressure, mmHg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbp: Option<f64>,
    /// Systolic blood pressure, mmHg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sbp: Option<f64>,
    /// Pulse rate, beats per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr: Option<f64>,
    /// Respiration rate, breaths per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rr: Option<f64>,
}

impl ParticipantRecord {
    pub fn center(&self) -> &str {
        &self.randomization.center
    }

    pub fn gender(&self) -> Gender {
        self.demographics.gender
    }

    pub fn treatment(&self) -> Treatment {
        self.randomization.treatment
    }

    pub fn age_group(&self) -> AgeGroup {
        self.demographics.age_group
    }

    pub fn pga_score(&self) -> i32 {
        self.global_assessment.pga_score
    }

    /// True if any recorded adverse event carries exactly this name.
    pub fn has_adverse_event(&self, name: &str) -> bool {
        self.ae_data.iter().any(|event| event.ae == name)
    }
}
