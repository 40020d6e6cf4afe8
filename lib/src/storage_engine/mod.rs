// lib/src/storage_engine/mod.rs

// Module declarations
pub mod storage_engine;
pub mod inmemory_storage;
pub mod sled_storage;
pub mod storage_utils;
pub mod seed;

// Re-export key types and traits for external use
pub use storage_engine::TrialStore;
pub use inmemory_storage::InMemoryTrialStore;
pub use sled_storage::{open_sled_db, SledTrialStore};
pub use seed::seed_records;
pub use storage_utils::load_dataset_file;

use log::{info, warn};
use std::sync::Arc;

use models::errors::TrialResult;

use crate::config::{StorageConfig, StorageEngineType};

/// Creates a record store based on the provided configuration.
///
/// The in-memory engine loads `dataset_path` when set and the bundled seed
/// otherwise. The sled engine opens `data_path`; an empty database is
/// populated from the same source before first use.
pub async fn create_storage(config: &StorageConfig) -> TrialResult<Arc<dyn TrialStore>> {
    let records = match &config.dataset_path {
        Some(path) => load_dataset_file(path),
        None => seed_records(),
    };

    match config.engine_type()? {
        StorageEngineType::InMemory => {
            let store = InMemoryTrialStore::new(records?)?;
            info!("Using in-memory trial store with {} records", store.records().len());
            Ok(Arc::new(store))
        }
        StorageEngineType::Sled => {
            let store = SledTrialStore::open(&config.data_path)?;
            if store.is_empty() {
                warn!("Sled store at {:?} is empty, importing initial dataset", config.data_path);
                store.import(&records?).await?;
            }
            Ok(Arc::new(store))
        }
    }
}
