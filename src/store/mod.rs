use std::cell::{Cell, RefCell};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::search::{matches_category, matches_query};
use crate::domain::seed::demo_contacts;
use crate::domain::{Contact, ContactDraft, ContactId};
use crate::errors::AppError;
use crate::storage::{KeyValueStorage, decode_contacts, encode_contacts};

pub const DEFAULT_STORAGE_KEY: &str = "contacts";
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Key of the durable slot holding the whole collection.
    pub storage_key: String,
    /// Simulated I/O delay each operation suspends for.
    pub latency: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            latency: DEFAULT_LATENCY,
        }
    }
}

impl StoreConfig {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

/// Authoritative, insertion-ordered contact collection.
///
/// Every operation suspends once for `config.latency` and then runs to
/// completion without yielding, so two calls never interleave their internal
/// steps. Results are always owned copies.
///
/// The collection is read from storage lazily on the first operation. An
/// empty slot is seeded with the demonstration dataset and written back; an
/// unreadable slot fails the operation and is retried on the next one.
pub struct ContactStore {
    storage: Box<dyn KeyValueStorage>,
    config: StoreConfig,
    contacts: RefCell<Vec<Contact>>,
    loaded: Cell<bool>,
}

impl ContactStore {
    pub fn new(storage: Box<dyn KeyValueStorage>, config: StoreConfig) -> Self {
        Self {
            storage,
            config,
            contacts: RefCell::new(Vec::new()),
            loaded: Cell::new(false),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn medium(&self) -> &str {
        self.storage.get_medium()
    }

    pub async fn list(&self) -> Result<Vec<Contact>, AppError> {
        self.io_delay().await;
        self.ensure_loaded()?;

        let contacts = self.contacts.borrow().clone();
        debug!(count = contacts.len(), "listed contacts");
        Ok(contacts)
    }

    /// A missing id is `Ok(None)`, not an error.
    pub async fn get_by_id(&self, id: &ContactId) -> Result<Option<Contact>, AppError> {
        self.io_delay().await;
        self.ensure_loaded()?;

        let found = self.contacts.borrow().iter().find(|c| &c.id == id).cloned();
        debug!(%id, found = found.is_some(), "looked up contact");
        Ok(found)
    }

    pub async fn create(&self, draft: ContactDraft) -> Result<Contact, AppError> {
        self.io_delay().await;
        self.ensure_loaded()?;

        let contact = Contact::from_draft(self.fresh_id(), draft, Utc::now());

        let mut next = self.contacts.borrow().clone();
        next.push(contact.clone());
        self.commit(next)?;

        debug!(id = %contact.id, "created contact");
        Ok(contact)
    }

    pub async fn update(
        &self,
        id: &ContactId,
        draft: ContactDraft,
    ) -> Result<Option<Contact>, AppError> {
        self.io_delay().await;
        self.ensure_loaded()?;

        let mut next = self.contacts.borrow().clone();
        let Some(contact) = next.iter_mut().find(|c| &c.id == id) else {
            debug!(%id, "update skipped, no such contact");
            return Ok(None);
        };

        contact.apply(draft, Utc::now());
        let updated = contact.clone();
        self.commit(next)?;

        debug!(%id, "updated contact");
        Ok(Some(updated))
    }

    /// Returns whether a record was removed. Deleting a missing id is `false`.
    pub async fn delete(&self, id: &ContactId) -> Result<bool, AppError> {
        self.io_delay().await;
        self.ensure_loaded()?;

        let mut next = self.contacts.borrow().clone();
        let before = next.len();
        next.retain(|c| &c.id != id);

        if next.len() == before {
            debug!(%id, "delete skipped, no such contact");
            return Ok(false);
        }

        self.commit(next)?;
        debug!(%id, "deleted contact");
        Ok(true)
    }

    /// Blank queries are not special-cased here; an empty needle matches
    /// every record anyway.
    pub async fn search(&self, query: &str) -> Result<Vec<Contact>, AppError> {
        self.io_delay().await;
        self.ensure_loaded()?;

        let results: Vec<Contact> = self
            .contacts
            .borrow()
            .iter()
            .filter(|c| matches_query(c, query))
            .cloned()
            .collect();

        debug!(query, count = results.len(), "searched contacts");
        Ok(results)
    }

    /// `"all"` disables filtering.
    pub async fn filter_by_category(&self, category: &str) -> Result<Vec<Contact>, AppError> {
        self.io_delay().await;
        self.ensure_loaded()?;

        let results: Vec<Contact> = self
            .contacts
            .borrow()
            .iter()
            .filter(|c| matches_category(c, category))
            .cloned()
            .collect();

        debug!(category, count = results.len(), "filtered contacts");
        Ok(results)
    }

    async fn io_delay(&self) {
        if self.config.latency.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.config.latency).await;
        }
    }

    fn ensure_loaded(&self) -> Result<(), AppError> {
        if self.loaded.get() {
            return Ok(());
        }

        let key = &self.config.storage_key;
        let contacts = match self.storage.get(key)? {
            Some(blob) => {
                let contacts = decode_contacts(key, &blob).inspect_err(|err| {
                    warn!(key = %key, error = %err, "refusing to load unreadable contacts");
                })?;
                info!(key = %key, count = contacts.len(), "loaded contacts");
                contacts
            }
            None => {
                let seed = demo_contacts();
                self.storage.set(key, &encode_contacts(&seed)?)?;
                info!(key = %key, count = seed.len(), "seeded empty storage");
                seed
            }
        };

        *self.contacts.borrow_mut() = contacts;
        self.loaded.set(true);
        Ok(())
    }

    /// Persists `next` and only then makes it the in-memory collection, so a
    /// failed write leaves both sides as they were.
    fn commit(&self, next: Vec<Contact>) -> Result<(), AppError> {
        let blob = encode_contacts(&next)?;
        self.storage.set(&self.config.storage_key, &blob)?;
        *self.contacts.borrow_mut() = next;
        Ok(())
    }

    fn fresh_id(&self) -> ContactId {
        let contacts = self.contacts.borrow();
        loop {
            let id = ContactId::generate();
            if !contacts.iter().any(|c| c.id == id) {
                return id;
            }
        }
    }
}
