// lib/src/analytics/distributions.rs

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use models::{AgeGroup, Gender, ParticipantRecord, Treatment};

/// Maximum number of entries in the adverse-event frequency list.
pub const TOP_ADVERSE_EVENTS: usize = 10;

/// Count of records sharing one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Count of records sharing one PGA score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreCount {
    pub score: i32,
    pub count: usize,
}

/// Distribution counts over a (filtered) record collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub total: usize,
    pub gender: Vec<LabelCount>,
    pub treatment: Vec<LabelCount>,
    pub age_group: Vec<LabelCount>,
    pub pga_score: Vec<ScoreCount>,
    pub adverse_events: Vec<LabelCount>,
}

impl DatasetStats {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ParticipantRecord>,
    {
        let records: Vec<&ParticipantRecord> = records.into_iter().collect();
        DatasetStats {
            total: records.len(),
            gender: gender_distribution(&records),
            treatment: treatment_distribution(&records),
            age_group: age_group_distribution(&records),
            pga_score: pga_distribution(&records),
            adverse_events: adverse_event_frequency(&records),
        }
    }
}

/// Counts per domain member, in declaration order, omitting zero counts.
fn count_domain<T, F>(records: &[&ParticipantRecord], domain: &[T], key: F) -> Vec<LabelCount>
where
    T: Copy + Eq + std::hash::Hash + std::fmt::Display,
    F: Fn(&ParticipantRecord) -> T,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    for record in records {
        *counts.entry(key(*record)).or_insert(0) += 1;
    }
    domain
        .iter()
        .filter_map(|member| {
            counts.get(member).map(|&count| LabelCount { label: member.to_string(), count })
        })
        .collect()
}

pub fn gender_distribution(records: &[&ParticipantRecord]) -> Vec<LabelCount> {
    count_domain(records, Gender::ALL, ParticipantRecord::gender)
}

pub fn treatment_distribution(records: &[&ParticipantRecord]) -> Vec<LabelCount> {
    count_domain(records, Treatment::ALL, ParticipantRecord::treatment)
}

/// Age-group counts in canonical order: 18-30, 31-45, 46-60, 61+, Unknown.
pub fn age_group_distribution(records: &[&ParticipantRecord]) -> Vec<LabelCount> {
    count_domain(records, AgeGroup::ALL, ParticipantRecord::age_group)
}

pub fn pga_distribution(records: &[&ParticipantRecord]) -> Vec<ScoreCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.pga_score()).or_insert(0) += 1;
    }
    counts.into_iter().map(|(score, count)| ScoreCount { score, count }).collect()
}

/// Occurrences of each adverse-event name across all `aeData` entries,
/// most frequent first, ties by name, capped at [`TOP_ADVERSE_EVENTS`].
pub fn adverse_event_frequency(records: &[&ParticipantRecord]) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for event in records.iter().flat_map(|record| record.ae_data.iter()) {
        *counts.entry(event.ae.as_str()).or_insert(0) += 1;
    }
    let mut frequency: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount { label: label.to_string(), count })
        .collect();
    frequency.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    frequency.truncate(TOP_ADVERSE_EVENTS);
    frequency
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_engine::filter_records;
    use crate::storage_engine::seed_records;
    use models::{AdverseEvent, AeRelationship, AeSeverity, TrialFilters};

    fn pairs(counts: &[LabelCount]) -> Vec<(&str, usize)> {
        counts.iter().map(|c| (c.label.as_str(), c.count)).collect()
    }

    #[test]
    fn should_count_seed_distributions() {
        let records = seed_records().unwrap();
        let stats = DatasetStats::from_records(&records);

        assert_eq!(stats.total, 10);
        assert_eq!(pairs(&stats.gender), vec![("Male", 4), ("Female", 4), ("Other", 2)]);
        assert_eq!(
            pairs(&stats.treatment),
            vec![("Active Drug", 4), ("Placebo", 3), ("Comparator", 3)]
        );
        assert_eq!(
            pairs(&stats.age_group),
            vec![("18-30", 2), ("31-45", 3), ("46-60", 2), ("61+", 3)]
        );
        let pga: Vec<(i32, usize)> = stats.pga_score.iter().map(|c| (c.score, c.count)).collect();
        assert_eq!(pga, vec![(1, 1), (2, 4), (3, 2), (4, 2), (5, 1)]);
    }

    #[test]
    fn should_rank_adverse_events_by_frequency_then_name() {
        let records = seed_records().unwrap();
        let stats = DatasetStats::from_records(&records);
        assert_eq!(
            pairs(&stats.adverse_events),
            vec![("Headache", 3), ("Dizziness", 2), ("Fatigue", 2), ("Nausea", 2), ("Rash", 2)]
        );
    }

    #[test]
    fn should_cap_adverse_events_at_ten() {
        let mut record = seed_records().unwrap().remove(0);
        record.ae_data = (0..15)
            .map(|i| AdverseEvent {
                ae: format!("Event {:02}", i),
                ae_severity: AeSeverity::Mild,
                ae_relationship: AeRelationship::Unlikely,
            })
            .collect();
        let frequency = adverse_event_frequency(&[&record]);
        assert_eq!(frequency.len(), TOP_ADVERSE_EVENTS);
        assert_eq!(frequency[0].label, "Event 00");
        assert_eq!(frequency[9].label, "Event 09");
    }

    #[test]
    fn should_omit_empty_categories_for_filtered_records() {
        let records = seed_records().unwrap();
        let filters = TrialFilters { treatment: Some(Treatment::Placebo), ..Default::default() };
        let stats = DatasetStats::from_records(filter_records(&records, &filters));

        assert_eq!(stats.total, 3);
        assert_eq!(pairs(&stats.treatment), vec![("Placebo", 3)]);
        assert_eq!(
            pairs(&stats.age_group),
            vec![("31-45", 1), ("46-60", 1), ("61+", 1)]
        );
    }

    #[test]
    fn should_produce_empty_stats_for_no_records() {
        let stats = DatasetStats::from_records(&Vec::<ParticipantRecord>::new());
        assert_eq!(stats.total, 0);
        assert!(stats.gender.is_empty());
        assert!(stats.adverse_events.is_empty());
    }

    #[test]
    fn should_serialize_with_camel_case_keys() {
        let records = seed_records().unwrap();
        let json = serde_json::to_value(DatasetStats::from_records(&records)).unwrap();
        assert!(json.get("ageGroup").is_some());
        assert!(json.get("adverseEvents").is_some());
        assert_eq!(json["pgaScore"][0]["score"], 1);
    }
}
