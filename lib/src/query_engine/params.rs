// lib/src/query_engine/params.rs

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

use models::TrialFilters;

/// Builds filters from raw query parameters.
///
/// Empty values are ignored. A value that does not parse (an unknown enum
/// label, a non-numeric `pgaScore`, a flag other than `true`/`false`) is
/// dropped with a warning, so the criterion is simply absent.
pub fn filters_from_query(params: &HashMap<String, String>) -> TrialFilters {
    TrialFilters {
        center: non_empty(params, "center").map(str::to_string),
        gender: parsed(params, "gender"),
        treatment: parsed(params, "treatment"),
        age_group: parsed(params, "ageGroup"),
        pga_score: parsed(params, "pgaScore"),
        adverse_event_name: non_empty(params, "adverseEventName").map(str::to_string),
        itt: parsed(params, "itt"),
        pp: parsed(params, "pp"),
    }
}

fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn parsed<T: FromStr>(params: &HashMap<String, String>, key: &str) -> Option<T> {
    parse_raw(non_empty(params, key)?, key)
}

fn parse_raw<T: FromStr>(raw: &str, key: &str) -> Option<T> {
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value {:?} for filter parameter {}", raw, key);
            None
        }
    }
}

/// Builds filters from a JSON object with the same keys as the query string.
///
/// Strings go through the same parsing as query values, so `"pgaScore": "3"`
/// and `"itt": "true"` are accepted. Nulls, empty strings and values that do
/// not fit the field are dropped with a warning.
pub fn filters_from_json(value: &Value) -> TrialFilters {
    let Some(object) = value.as_object() else {
        if !value.is_null() {
            warn!("Ignoring non-object filters {}", value);
        }
        return TrialFilters::default();
    };
    TrialFilters {
        center: json_field(object, "center"),
        gender: json_field(object, "gender"),
        treatment: json_field(object, "treatment"),
        age_group: json_field(object, "ageGroup"),
        pga_score: json_field(object, "pgaScore"),
        adverse_event_name: json_field(object, "adverseEventName"),
        itt: json_field(object, "itt"),
        pp: json_field(object, "pp"),
    }
}

fn json_field<T: FromStr + DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<T> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                None
            } else {
                parse_raw(raw, key)
            }
        }
        other => match serde_json::from_value::<T>(other.clone()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid value {} for filter field {}", other, key);
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{AgeGroup, Gender, Treatment};
    use serde_json::json;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn should_parse_every_known_parameter() {
        let filters = filters_from_query(&query(&[
            ("center", "City Hospital"),
            ("gender", "Male"),
            ("treatment", "Active Drug"),
            ("ageGroup", "61+"),
            ("pgaScore", "3"),
            ("adverseEventName", "Headache"),
            ("itt", "true"),
            ("pp", "false"),
        ]));
        assert_eq!(
            filters,
            TrialFilters {
                center: Some("City Hospital".to_string()),
                gender: Some(Gender::Male),
                treatment: Some(Treatment::ActiveDrug),
                age_group: Some(AgeGroup::Over60),
                pga_score: Some(3),
                adverse_event_name: Some("Headache".to_string()),
                itt: Some(true),
                pp: Some(false),
            }
        );
    }

    #[test]
    fn should_ignore_empty_values() {
        let filters = filters_from_query(&query(&[("center", ""), ("gender", "  "), ("pgaScore", "")]));
        assert!(filters.is_empty());
    }

    #[test]
    fn should_drop_malformed_values() {
        let filters = filters_from_query(&query(&[
            ("pgaScore", "three"),
            ("itt", "yes"),
            ("gender", "male"),
            ("treatment", "Placebo"),
        ]));
        assert_eq!(
            filters,
            TrialFilters { treatment: Some(Treatment::Placebo), ..Default::default() }
        );
    }

    #[test]
    fn should_ignore_unknown_parameters() {
        let filters = filters_from_query(&query(&[("studyId", "S-1"), ("page", "2")]));
        assert_eq!(filters, TrialFilters::default());
    }

    #[test]
    fn should_read_json_filters_leniently() {
        let filters = filters_from_json(&json!({
            "gender": "male",
            "treatment": "Placebo",
            "pgaScore": "3",
            "itt": true,
            "pp": "yes",
            "center": "",
            "adverseEventName": null,
        }));
        assert_eq!(
            filters,
            TrialFilters {
                treatment: Some(Treatment::Placebo),
                pga_score: Some(3),
                itt: Some(true),
                ..Default::default()
            }
        );
    }

    #[test]
    fn should_drop_json_values_of_the_wrong_type() {
        let filters = filters_from_json(&json!({ "pgaScore": 2.5, "gender": 1, "ageGroup": "61+" }));
        assert_eq!(filters, TrialFilters { age_group: Some(AgeGroup::Over60), ..Default::default() });
        assert!(filters_from_json(&json!(["Male"])).is_empty());
        assert!(filters_from_json(&Value::Null).is_empty());
    }
}
