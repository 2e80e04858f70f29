use std::path::PathBuf;
use std::time::Duration;

use crate::controller::ContactStateController;
use crate::errors::AppError;
use crate::storage::{StorageMedium, open_storage};
use crate::store::{ContactStore, DEFAULT_STORAGE_KEY, StoreConfig};

pub const DEFAULT_DATA_DIR: &str = "./.instance";

/// Settings for the `rolodex` binary. The library itself never reads the
/// environment; everything arrives through here.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub medium: StorageMedium,
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub latency: Duration,
}

impl AppConfig {
    pub fn new(medium: &str, data_dir: PathBuf, latency_ms: u64) -> Result<Self, AppError> {
        Ok(Self {
            medium: StorageMedium::from(medium)?,
            data_dir,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            latency: Duration::from_millis(latency_ms),
        })
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            storage_key: self.storage_key.clone(),
            latency: self.latency,
        }
    }

    pub fn open_controller(&self) -> ContactStateController {
        let storage = open_storage(self.medium, self.data_dir.clone());
        ContactStateController::new(ContactStore::new(storage, self.store_config()))
    }
}
