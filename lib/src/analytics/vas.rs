// lib/src/analytics/vas.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use models::errors::TrialError;
use models::{ParticipantRecord, VasDataPoint};

/// Window applied to a patient's VAS series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VasPeriod {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "14days")]
    Last14Days,
    #[serde(rename = "30days")]
    Last30Days,
}

impl VasPeriod {
    /// Window length in days, `None` for the whole series.
    pub fn days(&self) -> Option<i32> {
        match self {
            VasPeriod::All => None,
            VasPeriod::Last7Days => Some(7),
            VasPeriod::Last14Days => Some(14),
            VasPeriod::Last30Days => Some(30),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VasPeriod::All => "all",
            VasPeriod::Last7Days => "7days",
            VasPeriod::Last14Days => "14days",
            VasPeriod::Last30Days => "30days",
        }
    }
}

impl fmt::Display for VasPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VasPeriod {
    type Err = TrialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(VasPeriod::All),
            "7days" => Ok(VasPeriod::Last7Days),
            "14days" => Ok(VasPeriod::Last14Days),
            "30days" => Ok(VasPeriod::Last30Days),
            other => Err(TrialError::InvalidData(format!("Unknown VAS period: {}", other))),
        }
    }
}

/// The patient's VAS points sorted by day. A windowed period keeps the points
/// with `day > latest_day - N`.
pub fn vas_timeline(record: &ParticipantRecord, period: VasPeriod) -> Vec<VasDataPoint> {
    let mut points = record.vas_data.clone();
    points.sort_by_key(|point| point.day);

    if let (Some(window), Some(latest)) = (period.days(), points.last().map(|p| p.day)) {
        let cutoff = i64::from(latest) - i64::from(window);
        points.retain(|point| i64::from(point.day) > cutoff);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage_engine::seed_records;

    fn record(id: &str) -> ParticipantRecord {
        seed_records()
            .unwrap()
            .into_iter()
            .find(|r| r.patient_id == id)
            .unwrap()
    }

    fn days(points: &[VasDataPoint]) -> Vec<i32> {
        points.iter().map(|p| p.day).collect()
    }

    #[test]
    fn should_return_full_series_sorted_by_day() {
        let mut patient = record("P001");
        patient.vas_data.reverse();
        let timeline = vas_timeline(&patient, VasPeriod::All);
        assert_eq!(days(&timeline), vec![0, 7, 14, 28]);
        assert_eq!(timeline[0].vas_score, 7.5);
    }

    #[test]
    fn should_keep_only_the_last_days() {
        let patient = record("P003");
        assert_eq!(days(&vas_timeline(&patient, VasPeriod::Last7Days)), vec![21]);
        assert_eq!(days(&vas_timeline(&patient, VasPeriod::Last14Days)), vec![14, 21]);
        assert_eq!(days(&vas_timeline(&patient, VasPeriod::Last30Days)), vec![0, 7, 14, 21]);
    }

    #[test]
    fn should_keep_empty_series_empty() {
        let mut patient = record("P002");
        patient.vas_data.clear();
        assert!(vas_timeline(&patient, VasPeriod::Last7Days).is_empty());
    }

    #[test]
    fn should_parse_periods() {
        assert_eq!("14days".parse::<VasPeriod>().unwrap(), VasPeriod::Last14Days);
        assert_eq!("all".parse::<VasPeriod>().unwrap(), VasPeriod::All);
        assert!("fortnight".parse::<VasPeriod>().is_err());
    }

    #[test]
    fn should_window_extreme_days_without_overflow() {
        let mut patient = record("P003");
        for (point, day) in patient.vas_data.iter_mut().zip([i32::MIN, i32::MIN + 3, i32::MIN + 5]) {
            point.day = day;
        }
        patient.vas_data.truncate(3);
        assert_eq!(
            days(&vas_timeline(&patient, VasPeriod::Last7Days)),
            vec![i32::MIN, i32::MIN + 3, i32::MIN + 5]
        );
    }
}
