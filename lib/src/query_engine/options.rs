// lib/src/query_engine/options.rs

//! Distinct values observed in the store, used to populate filter choices.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use models::errors::TrialError;
use models::{AgeGroup, Gender, ParticipantRecord, Treatment};

/// Trial center names, lexicographic.
pub fn center_options(records: &[ParticipantRecord]) -> Vec<String> {
    let centers: BTreeSet<&str> = records.iter().map(|r| r.center()).collect();
    centers.into_iter().map(str::to_string).collect()
}

pub fn gender_options(records: &[ParticipantRecord]) -> Vec<Gender> {
    sorted_by_label(records.iter().map(|r| r.gender()), Gender::as_str)
}

pub fn treatment_options(records: &[ParticipantRecord]) -> Vec<Treatment> {
    sorted_by_label(records.iter().map(|r| r.treatment()), Treatment::as_str)
}

pub fn age_group_options(records: &[ParticipantRecord]) -> Vec<AgeGroup> {
    sorted_by_label(records.iter().map(|r| r.age_group()), AgeGroup::as_str)
}

/// Adverse-event names across all records, lexicographic.
pub fn adverse_event_options(records: &[ParticipantRecord]) -> Vec<String> {
    let names: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.ae_data.iter().map(|event| event.ae.as_str()))
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// PGA scores, ascending.
pub fn pga_score_options(records: &[ParticipantRecord]) -> Vec<i32> {
    let scores: BTreeSet<i32> = records.iter().map(|r| r.pga_score()).collect();
    scores.into_iter().collect()
}

fn sorted_by_label<T, I>(values: I, label: fn(&T) -> &'static str) -> Vec<T>
where
    T: PartialEq,
    I: Iterator<Item = T>,
{
    let mut out: Vec<T> = values.collect();
    out.sort_by(|a, b| label(a).cmp(label(b)));
    out.dedup();
    out
}

/// A filterable field with an option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Centers,
    Genders,
    Treatments,
    AgeGroups,
    AdverseEvents,
    PgaScores,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Centers,
        FilterField::Genders,
        FilterField::Treatments,
        FilterField::AgeGroups,
        FilterField::AdverseEvents,
        FilterField::PgaScores,
    ];

    /// The path segment used by the HTTP routes and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Centers => "centers",
            FilterField::Genders => "genders",
            FilterField::Treatments => "treatments",
            FilterField::AgeGroups => "age-groups",
            FilterField::AdverseEvents => "adverse-events",
            FilterField::PgaScores => "pga-scores",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = TrialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| TrialError::InvalidData(format!("Unknown filter field: {}", s)))
    }
}

/// Option list for one field. Serializes as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterOptions {
    Labels(Vec<String>),
    Scores(Vec<i32>),
}

impl FilterOptions {
    pub fn len(&self) -> usize {
        match self {
            FilterOptions::Labels(values) => values.len(),
            FilterOptions::Scores(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display strings, one per option.
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            FilterOptions::Labels(values) => values.clone(),
            FilterOptions::Scores(values) => values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

pub fn options_for(records: &[ParticipantRecord], field: FilterField) -> FilterOptions {
    fn labels<T: fmt::Display>(values: Vec<T>) -> FilterOptions {
        FilterOptions::Labels(values.iter().map(|v| v.to_string()).collect())
    }

    match field {
        FilterField::Centers => FilterOptions::Labels(center_options(records)),
        FilterField::Genders => labels(gender_options(records)),
        FilterField::Treatments => labels(treatment_options(records)),
        FilterField::AgeGroups => labels(age_group_options(records)),
        FilterField::AdverseEvents => FilterOptions::Labels(adverse_event_options(records)),
        FilterField::PgaScores => FilterOptions::Scores(pga_score_options(records)),
    }
}
