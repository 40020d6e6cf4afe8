// lib/src/analytics/mod.rs

pub mod distributions;
pub mod vas;

pub use distributions::{
    adverse_event_frequency, age_group_distribution, gender_distribution, pga_distribution,
    treatment_distribution, DatasetStats, LabelCount, ScoreCount, TOP_ADVERSE_EVENTS,
};
pub use vas::{vas_timeline, VasPeriod};
