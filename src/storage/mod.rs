pub mod file;
pub mod memory;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::Contact;
use crate::errors::AppError;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A durable key-value slot. Each key holds one serialized document.
pub trait KeyValueStorage {
    /// `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMedium {
    Json,
    Mem,
}

impl StorageMedium {
    pub fn is_json(&self) -> bool {
        matches!(self, StorageMedium::Json)
    }

    pub fn is_mem(&self) -> bool {
        matches!(self, StorageMedium::Mem)
    }

    pub fn is_which(&self) -> &str {
        if self.is_json() { "json" } else { "mem" }
    }

    pub fn from(str: &str) -> Result<Self, AppError> {
        match str.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageMedium::Json),
            "mem" => Ok(StorageMedium::Mem),
            _ => Err(AppError::Validation(format!(
                "Not a recognized storage medium: '{}'",
                str
            ))),
        }
    }
}

pub fn open_storage(medium: StorageMedium, data_dir: PathBuf) -> Box<dyn KeyValueStorage> {
    debug!(medium = medium.is_which(), dir = %data_dir.display(), "opening storage");

    match medium {
        StorageMedium::Json => Box::new(FileStorage::new(data_dir)),
        StorageMedium::Mem => Box::new(MemoryStorage::new()),
    }
}

pub fn encode_contacts(contacts: &[Contact]) -> Result<String, AppError> {
    Ok(serde_json::to_string(contacts)?)
}

/// An empty or malformed blob is an error, never an empty collection.
pub fn decode_contacts(key: &str, blob: &str) -> Result<Vec<Contact>, AppError> {
    serde_json::from_str(blob).map_err(|source| AppError::Corrupt {
        key: key.to_string(),
        source,
    })
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
