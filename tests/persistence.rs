use std::fs;

use rolodex_state::prelude::*;

fn file_store(dir: &std::path::Path) -> ContactStore {
    ContactStore::new(Box::new(FileStorage::new(dir)), StoreConfig::default())
}

fn ann() -> ContactDraft {
    ContactDraft {
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: "a@x.com".to_string(),
        phone: "555".to_string(),
        category: "other".to_string(),
        company: Some("Lee & Co".to_string()),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn first_use_writes_seed_file() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let store = file_store(dir.path());

    store.list().await?;

    let raw = fs::read_to_string(dir.path().join("contacts.json"))?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(value.as_array().map(Vec::len), Some(5));
    assert_eq!(value[0]["firstName"], "John");
    assert_eq!(value[0]["avatarUrl"], "https://i.pravatar.cc/150?img=1");
    assert!(value[1].get("company").is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn reload_returns_identical_sequence() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let store = file_store(dir.path());

    let created = store.create(ann()).await?;
    let mut change = ContactDraft::from(&created);
    change.notes = Some("second visit".to_string());
    store.update(&created.id, change).await?;
    store.delete(&ContactId::from("2")).await?;
    let before = store.list().await?;

    let reopened = file_store(dir.path());
    assert_eq!(reopened.list().await?, before);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn deletion_reaches_disk_immediately() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let store = file_store(dir.path());

    assert!(store.delete(&ContactId::from("5")).await?);

    let raw = fs::read_to_string(dir.path().join("contacts.json"))?;
    assert!(!raw.contains("David"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn corrupt_file_is_reported_not_replaced() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("contacts.json");
    fs::write(&path, "[{\"id\": \"1\", \"firstName\":")?;
    let store = file_store(dir.path());

    let err = store.list().await.unwrap_err();
    assert!(err.is_persistence());
    assert!(matches!(err, AppError::Corrupt { .. }));

    assert!(store.create(ann()).await.is_err());
    assert_eq!(fs::read_to_string(&path)?, "[{\"id\": \"1\", \"firstName\":");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn empty_file_is_corrupt() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("contacts.json"), "")?;

    let store = file_store(dir.path());

    assert!(matches!(store.list().await, Err(AppError::Corrupt { .. })));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn existing_blob_is_loaded_instead_of_seed() -> Result<(), AppError> {
    let storage = MemoryStorage::new();
    let writer = ContactStore::new(Box::new(storage.clone()), StoreConfig::default());
    writer.create(ann()).await?;

    let reader = ContactStore::new(Box::new(storage), StoreConfig::default());
    let contacts = reader.list().await?;

    assert_eq!(contacts.len(), 6);
    assert_eq!(contacts, writer.list().await?);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn separate_keys_are_separate_collections() -> Result<(), AppError> {
    let storage = MemoryStorage::new();
    let config = StoreConfig {
        storage_key: "archive".to_string(),
        ..StoreConfig::default()
    };
    let archive = ContactStore::new(Box::new(storage.clone()), config);
    let main = ContactStore::new(Box::new(storage.clone()), StoreConfig::default());

    archive.delete(&ContactId::from("1")).await?;

    assert_eq!(archive.list().await?.len(), 4);
    assert_eq!(main.list().await?.len(), 5);
    assert_eq!(storage.len(), 2);
    Ok(())
}
