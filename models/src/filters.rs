// models/src/filters.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::{AgeGroup, Gender, Treatment};
use crate::participant::ParticipantRecord;

/// Sparse equality criteria over participant records. A `None` field places
/// no constraint; present fields are combined with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<Treatment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<AgeGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pga_score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adverse_event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itt: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pp: Option<bool>,
}

impl TrialFilters {
    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }

    /// True if the record satisfies every present criterion.
    pub fn matches(&self, record: &ParticipantRecord) -> bool {
        if let Some(center) = &self.center {
            if record.center() != center.as_str() {
                return false;
            }
        }
        if let Some(gender) = self.gender {
            if record.gender() != gender {
                return false;
            }
        }
        if let Some(treatment) = self.treatment {
            if record.treatment() != treatment {
                return false;
            }
        }
        if let Some(age_group) = self.age_group {
            if record.age_group() != age_group {
                return false;
            }
        }
        if let Some(score) = self.pga_score {
            if record.pga_score() != score {
                return false;
            }
        }
        if let Some(name) = &self.adverse_event_name {
            if !record.has_adverse_event(name) {
                return false;
            }
        }
        if let Some(itt) = self.itt {
            if record.study_populations.itt != itt {
                return false;
            }
        }
        if let Some(pp) = self.pp {
            if record.study_populations.pp != pp {
                return false;
            }
        }
        true
    }

    /// Present criteria as `(label, value)` pairs in a fixed order.
    pub fn criteria(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(center) = &self.center {
            out.push(("Trial Center", center.clone()));
        }
        if let Some(gender) = self.gender {
            out.push(("Gender", gender.to_string()));
        }
        if let Some(treatment) = self.treatment {
            out.push(("Treatment", treatment.to_string()));
        }
        if let Some(age_group) = self.age_group {
            out.push(("Age Group", age_group.to_string()));
        }
        if let Some(score) = self.pga_score {
            out.push(("PGA Score", score.to_string()));
        }
        if let Some(name) = &self.adverse_event_name {
            out.push(("Adverse Event", name.clone()));
        }
        if let Some(itt) = self.itt {
            out.push(("ITT Population", yes_no(itt).to_string()));
        }
        if let Some(pp) = self.pp {
            out.push(("PP Population", yes_no(pp).to_string()));
        }
        out
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Renders as `Trial Center: X; Gender: Y`, or `No filters applied`.
impl fmt::Display for TrialFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let criteria = self.criteria();
        if criteria.is_empty() {
            return f.write_str("No filters applied");
        }
        let parts: Vec<String> = criteria
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_empty_filters() {
        let filters = TrialFilters::default();
        assert!(filters.is_empty());
        assert_eq!(filters.to_string(), "No filters applied");
    }

    #[test]
    fn should_describe_present_criteria_in_fixed_order() {
        let filters = TrialFilters {
            pp: Some(false),
            gender: Some(Gender::Female),
            center: Some("City Hospital".to_string()),
            ..Default::default()
        };
        assert_eq!(
            filters.to_string(),
            "Trial Center: City Hospital; Gender: Female; PP Population: No"
        );
    }

    #[test]
    fn should_deserialize_sparse_camel_case_filters() {
        let filters: TrialFilters =
            serde_json::from_str(r#"{"ageGroup": "61+", "pgaScore": 3, "adverseEventName": "Rash"}"#).unwrap();
        assert_eq!(filters.age_group, Some(AgeGroup::Over60));
        assert_eq!(filters.pga_score, Some(3));
        assert_eq!(filters.adverse_event_name.as_deref(), Some("Rash"));
        assert_eq!(filters.center, None);
        assert_eq!(serde_json::to_string(&TrialFilters::default()).unwrap(), "{}");
    }
}
