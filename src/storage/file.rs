use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use super::{KeyValueStorage, create_file_parent};
use crate::errors::AppError;

/// One JSON file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    pub medium: String,
    pub dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            medium: "json".to_string(),
            dir: dir.into(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.path_for(key);

        let mut file = match OpenOptions::new().read(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let mut data = String::new();
        file.read_to_string(&mut data)?;
        Ok(Some(data))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let path = self.path_for(key);
        create_file_parent(&path)?;

        // Write beside the target and rename over it so a torn write never
        // replaces the last good blob.
        let tmp = path.with_extension("json.tmp");
        write_all(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }
}

fn write_all(path: &Path, value: &str) -> Result<(), AppError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    file.write_all(value.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() -> Result<(), AppError> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.get("contacts")?, None);
        Ok(())
    }

    #[test]
    fn set_creates_directory_and_overwrites() -> Result<(), AppError> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("nested").join(".instance"));

        storage.set("contacts", "[1]")?;
        storage.set("contacts", "[]")?;

        assert_eq!(storage.get("contacts")?.as_deref(), Some("[]"));
        assert!(storage.path_for("contacts").exists());
        assert!(!storage.path_for("contacts").with_extension("json.tmp").exists());
        Ok(())
    }
}
