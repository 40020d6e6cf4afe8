// server/src/cli/handlers.rs

// Implementations of the trialdash subcommands. Each handler writes its
// result to the given writer so the output can be checked in tests.
use anyhow::{anyhow, Context, Result};
use log::{error, info};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::oneshot;

use models::TrialFilters;
use rest_api::{start_server, AppState};
use trial_lib::analytics::{vas_timeline, DatasetStats, VasPeriod};
use trial_lib::config::{AppConfig, StorageEngineType};
use trial_lib::insights::{build_summarizer, SummaryRequest, TrialInsightsService};
use trial_lib::query_engine::{options_for, FilterField};
use trial_lib::storage_engine::{create_storage, load_dataset_file, SledTrialStore, TrialStore};

pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn TrialStore>> {
    create_storage(&config.storage)
        .await
        .context("Failed to open the trial record store")
}

pub async fn handle_serve(config: &AppConfig) -> Result<()> {
    let store = open_store(config).await?;
    let summarizer = build_summarizer(&config.summarizer).context("Failed to configure summarizer")?;
    info!(
        "Serving {} store with {} summarizer",
        store.get_type(),
        summarizer.get_type()
    );
    let state = AppState::new(store, summarizer, config.summarizer.max_records);

    // Kept alive for the lifetime of the server; ctrl-c drives shutdown.
    let (_shutdown_tx, shutdown_rx) = oneshot::channel();
    start_server(&config.rest_api, state, shutdown_rx).await
}

pub async fn handle_query(store: &dyn TrialStore, filters: &TrialFilters, out: &mut impl Write) -> Result<()> {
    let records = store.query(filters).await?;
    info!("Filters [{}] matched {} records", filters, records.len());
    writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
    Ok(())
}

pub async fn handle_options(store: &dyn TrialStore, field: FilterField, out: &mut impl Write) -> Result<()> {
    let records = store.all_records().await?;
    for value in options_for(&records, field).to_strings() {
        writeln!(out, "{}", value)?;
    }
    Ok(())
}

pub async fn handle_patient(store: &dyn TrialStore, patient_id: &str, out: &mut impl Write) -> Result<()> {
    let record = store
        .get_record(patient_id)
        .await?
        .ok_or_else(|| anyhow!("Patient not found: {}", patient_id))?;
    writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
    Ok(())
}

pub async fn handle_vas(
    store: &dyn TrialStore,
    patient_id: &str,
    period: VasPeriod,
    out: &mut impl Write,
) -> Result<()> {
    let record = store
        .get_record(patient_id)
        .await?
        .ok_or_else(|| anyhow!("Patient not found: {}", patient_id))?;
    writeln!(out, "{:>5}  {:>5}", "day", "vas")?;
    for point in vas_timeline(&record, period) {
        writeln!(out, "{:>5}  {:>5.1}", point.day, point.vas_score)?;
    }
    Ok(())
}

pub async fn handle_stats(store: &dyn TrialStore, filters: &TrialFilters, out: &mut impl Write) -> Result<()> {
    let records = store.query(filters).await?;
    let stats = DatasetStats::from_records(&records);
    writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
    Ok(())
}

pub async fn handle_summarize(
    config: &AppConfig,
    store: Arc<dyn TrialStore>,
    request: SummaryRequest,
    out: &mut impl Write,
) -> Result<()> {
    let summarizer = build_summarizer(&config.summarizer).context("Failed to configure summarizer")?;
    let service = TrialInsightsService::new(store, summarizer).with_max_records(config.summarizer.max_records);

    match service.summarize(&request).await {
        Ok(response) => {
            writeln!(out, "{}", response.summary)?;
            Ok(())
        }
        Err(e) => {
            error!("{}", e.detail());
            Err(anyhow!("{}", e))
        }
    }
}

/// Loads the `--dataset` file into the sled store at the configured path.
pub async fn handle_import(config: &AppConfig, out: &mut impl Write) -> Result<()> {
    if config.storage.engine_type()? != StorageEngineType::Sled {
        info!("Import targets the sled store regardless of the configured engine");
    }
    let dataset = config
        .storage
        .dataset_path
        .as_deref()
        .ok_or_else(|| anyhow!("import requires --dataset <FILE>"))?;

    let records = load_dataset_file(dataset)
        .with_context(|| format!("Failed to load dataset {}", dataset.display()))?;
    let store = SledTrialStore::open(&config.storage.data_path)?;
    let imported = store.import(&records).await?;
    writeln!(
        out,
        "Imported {} records into {}",
        imported,
        config.storage.data_path.display()
    )?;
    Ok(())
}
