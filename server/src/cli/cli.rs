// server/src/cli/cli.rs

// Main entry point for the trialdash CLI: parses arguments, resolves the
// configuration and dispatches to the command handlers.
use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use std::io;

use trial_lib::config::{load_config, AppConfig};
use trial_lib::insights::SummaryRequest;

use super::commands::{CliArgs, TrialDashCommands};
use super::handlers::{
    handle_import, handle_options, handle_patient, handle_query, handle_serve, handle_stats,
    handle_summarize, handle_vas, open_store,
};

/// Applies command-line overrides on top of the loaded configuration.
pub fn resolve_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;

    if let Some(engine) = &args.engine {
        config.storage.engine_type = engine.clone();
        config.storage.engine_type()?;
    }
    if let Some(dataset) = &args.dataset {
        config.storage.dataset_path = Some(dataset.clone());
    }
    if let Some(data_path) = &args.data_path {
        config.storage.data_path = data_path.clone();
    }
    if let TrialDashCommands::Serve { host, port } = &args.command {
        if let Some(host) = host {
            config.rest_api.host = host.clone();
        }
        if let Some(port) = port {
            config.rest_api.port = *port;
        }
    }
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

pub async fn run(args: CliArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let mut stdout = io::stdout();

    match args.command {
        TrialDashCommands::Serve { .. } => handle_serve(&config).await,
        TrialDashCommands::Import => handle_import(&config, &mut stdout).await,
        TrialDashCommands::Query { filters } => {
            let store = open_store(&config).await?;
            handle_query(store.as_ref(), &filters.into(), &mut stdout).await
        }
        TrialDashCommands::Options { field } => {
            let store = open_store(&config).await?;
            handle_options(store.as_ref(), field, &mut stdout).await
        }
        TrialDashCommands::Patient { patient_id } => {
            let store = open_store(&config).await?;
            handle_patient(store.as_ref(), &patient_id, &mut stdout).await
        }
        TrialDashCommands::Vas { patient_id, period } => {
            let store = open_store(&config).await?;
            handle_vas(store.as_ref(), &patient_id, period, &mut stdout).await
        }
        TrialDashCommands::Stats { filters } => {
            let store = open_store(&config).await?;
            handle_stats(store.as_ref(), &filters.into(), &mut stdout).await
        }
        TrialDashCommands::Summarize { patient_id, study_id, filters } => {
            let store = open_store(&config).await?;
            let filters: models::TrialFilters = filters.into();
            let request = SummaryRequest {
                filters: (!filters.is_empty()).then_some(filters),
                patient_id,
                study_id,
            };
            handle_summarize(&config, store, request, &mut stdout).await
        }
    }
}

pub async fn start_cli() -> Result<()> {
    run(CliArgs::parse()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use trial_lib::config::DEFAULT_REST_API_PORT;

    #[test]
    fn should_apply_command_line_overrides() {
        let args = CliArgs::try_parse_from([
            "trialdash",
            "--engine",
            "sled",
            "--data-path",
            "/tmp/trialdash-test",
            "serve",
            "--port",
            "9100",
        ])
        .unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.rest_api.port, 9100);
        assert_eq!(config.storage.engine_type, "sled");
        assert_eq!(config.storage.data_path, PathBuf::from("/tmp/trialdash-test"));
    }

    #[test]
    fn should_keep_default_port_without_override() {
        let args = CliArgs::try_parse_from(["trialdash", "stats"]).unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.rest_api.port, DEFAULT_REST_API_PORT);
    }

    #[test]
    fn should_reject_unknown_engine_override() {
        let args = CliArgs::try_parse_from(["trialdash", "--engine", "rocksdb", "stats"]).unwrap();
        assert!(resolve_config(&args).is_err());
    }
}
