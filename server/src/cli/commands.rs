// server/src/cli/commands.rs

// Command-line arguments and subcommands for the trialdash CLI.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use models::{AgeGroup, Gender, Treatment, TrialFilters};
use trial_lib::analytics::VasPeriod;
use trial_lib::query_engine::FilterField;

#[derive(Parser, Debug)]
#[command(name = "trialdash")]
#[command(version)]
#[command(about = "Clinical-trial record service: filters, distributions and AI summaries")]
pub struct CliArgs {
    /// YAML configuration file (defaults to ./trialdash.yaml when present).
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Storage engine override: inmemory or sled.
    #[arg(long, global = true, value_name = "ENGINE")]
    pub engine: Option<String>,

    /// Dataset file loaded instead of the bundled seed records.
    #[arg(long, global = true, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    /// Directory of the sled database.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: TrialDashCommands,
}

#[derive(Debug, Subcommand)]
pub enum TrialDashCommands {
    /// Serve the REST API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
    /// Print the records matching the given filters
    Query {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List the distinct values of a filterable field
    Options {
        #[arg(value_parser = parse_filter_field, value_name = "FIELD")]
        field: FilterField,
    },
    /// Print one participant record
    Patient {
        #[arg(value_name = "PATIENT_ID")]
        patient_id: String,
    },
    /// Print a participant's VAS pain-score timeline
    Vas {
        #[arg(value_name = "PATIENT_ID")]
        patient_id: String,
        #[arg(long, default_value = "all", value_parser = parse_vas_period)]
        period: VasPeriod,
    },
    /// Print distribution counts for the matching records
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Request an AI summary of a patient or of the matching records
    Summarize {
        #[arg(long)]
        patient_id: Option<String>,
        #[arg(long)]
        study_id: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Replace the contents of the sled store with the `--dataset` file
    Import,
}

/// Filter criteria shared by the query, stats and summarize commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub center: Option<String>,
    #[arg(long)]
    pub gender: Option<Gender>,
    #[arg(long)]
    pub treatment: Option<Treatment>,
    #[arg(long)]
    pub age_group: Option<AgeGroup>,
    #[arg(long)]
    pub pga_score: Option<i32>,
    #[arg(long = "adverse-event")]
    pub adverse_event_name: Option<String>,
    #[arg(long, value_name = "true|false")]
    pub itt: Option<bool>,
    #[arg(long, value_name = "true|false")]
    pub pp: Option<bool>,
}

impl From<FilterArgs> for TrialFilters {
    fn from(args: FilterArgs) -> Self {
        TrialFilters {
            center: args.center,
            gender: args.gender,
            treatment: args.treatment,
            age_group: args.age_group,
            pga_score: args.pga_score,
            adverse_event_name: args.adverse_event_name,
            itt: args.itt,
            pp: args.pp,
        }
    }
}

fn parse_filter_field(value: &str) -> Result<FilterField, String> {
    value.parse().map_err(|e: models::TrialError| e.to_string())
}

fn parse_vas_period(value: &str) -> Result<VasPeriod, String> {
    value.parse().map_err(|e: models::TrialError| e.to_string())
}
