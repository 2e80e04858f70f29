use std::fmt;

use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::domain::search::CATEGORY_ALL;
use crate::domain::{Contact, ContactDraft, ContactId};
use crate::errors::AppError;
use crate::store::ContactStore;

/// Which query produced the current `contacts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    All,
    Search(String),
    Category(String),
}

/// Category of a failed operation, the only failure detail readers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedOperation {
    Fetch,
    Add,
    Update,
    Delete,
    Search,
    Filter,
}

impl fmt::Display for FailedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FailedOperation::Fetch => "Failed to fetch contacts",
            FailedOperation::Add => "Failed to add contact",
            FailedOperation::Update => "Failed to update contact",
            FailedOperation::Delete => "Failed to delete contact",
            FailedOperation::Search => "Failed to search contacts",
            FailedOperation::Filter => "Failed to filter contacts",
        };
        f.write_str(message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub contacts: Vec<Contact>,
    /// True while any snapshot-affecting operation is pending.
    pub loading: bool,
    pub error: Option<FailedOperation>,
    pub view: View,
    pending: usize,
}

impl Snapshot {
    pub fn pending(&self) -> usize {
        self.pending
    }

    fn acquire(&mut self) {
        self.pending += 1;
        self.loading = true;
    }

    fn release(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        self.loading = self.pending > 0;
    }
}

/// Tracks one pending operation. Dropping it unsettled still releases the
/// `loading` count.
struct InFlight<'a> {
    state: &'a watch::Sender<Snapshot>,
    done: bool,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a watch::Sender<Snapshot>) -> Self {
        state.send_modify(Snapshot::acquire);
        Self { state, done: false }
    }

    fn settle(mut self, fold: impl FnOnce(&mut Snapshot)) {
        self.done = true;
        self.state.send_modify(|snapshot| {
            snapshot.release();
            snapshot.error = None;
            fold(snapshot);
        });
    }

    fn fail(mut self, operation: FailedOperation, err: &AppError) {
        self.done = true;
        error!(%operation, error = %err, "contact operation failed");
        self.state.send_modify(|snapshot| {
            snapshot.release();
            snapshot.error = Some(operation);
        });
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.state.send_modify(Snapshot::release);
        }
    }
}

/// Keeps an observable [`Snapshot`] in step with a [`ContactStore`].
///
/// Each operation awaits the store and folds the result into the snapshot in
/// the same poll, so no other operation can observe or change the snapshot
/// between the store applying a write and the snapshot reflecting it. Folds
/// go through `send_modify` and touch only the records the operation owns.
///
/// Call [`refresh`](Self::refresh) once at startup to populate `contacts`.
pub struct ContactStateController {
    store: ContactStore,
    state: watch::Sender<Snapshot>,
}

impl ContactStateController {
    pub fn new(store: ContactStore) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self { store, state }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|snapshot| snapshot.error.take().is_some());
    }

    pub async fn refresh(&self) {
        let flight = InFlight::begin(&self.state);

        match self.store.list().await {
            Ok(contacts) => {
                debug!(count = contacts.len(), "refreshed snapshot");
                flight.settle(|snapshot| {
                    snapshot.contacts = contacts;
                    snapshot.view = View::All;
                });
            }
            Err(err) => flight.fail(FailedOperation::Fetch, &err),
        }
    }

    /// Pass-through lookup. Leaves `contacts`, `loading` and `error` alone and
    /// hands any failure to the caller.
    pub async fn get_by_id(&self, id: &ContactId) -> Result<Option<Contact>, AppError> {
        self.store
            .get_by_id(id)
            .await
            .inspect_err(|err| warn!(%id, error = %err, "contact lookup failed"))
    }

    /// Creation failures are returned so the caller can keep its input.
    pub async fn add(&self, draft: ContactDraft) -> Result<Contact, AppError> {
        let flight = InFlight::begin(&self.state);

        match self.store.create(draft).await {
            Ok(contact) => {
                let added = contact.clone();
                flight.settle(|snapshot| upsert(&mut snapshot.contacts, added));
                Ok(contact)
            }
            Err(err) => {
                flight.fail(FailedOperation::Add, &err);
                Err(err)
            }
        }
    }

    /// `None` when the id is unknown or the write failed; the two are told
    /// apart by `error`.
    pub async fn update(&self, id: &ContactId, draft: ContactDraft) -> Option<Contact> {
        let flight = InFlight::begin(&self.state);

        match self.store.update(id, draft).await {
            Ok(Some(contact)) => {
                let updated = contact.clone();
                flight.settle(|snapshot| {
                    if let Some(slot) = snapshot.contacts.iter_mut().find(|c| c.id == updated.id) {
                        *slot = updated;
                    }
                });
                Some(contact)
            }
            Ok(None) => {
                flight.settle(|_| {});
                None
            }
            Err(err) => {
                flight.fail(FailedOperation::Update, &err);
                None
            }
        }
    }

    pub async fn remove(&self, id: &ContactId) -> bool {
        let flight = InFlight::begin(&self.state);

        match self.store.delete(id).await {
            Ok(removed) => {
                flight.settle(|snapshot| {
                    if removed {
                        snapshot.contacts.retain(|c| &c.id != id);
                    }
                });
                removed
            }
            Err(err) => {
                flight.fail(FailedOperation::Delete, &err);
                false
            }
        }
    }

    /// A blank query is a refresh.
    pub async fn search(&self, query: &str) {
        if query.trim().is_empty() {
            self.refresh().await;
            return;
        }

        let flight = InFlight::begin(&self.state);

        match self.store.search(query).await {
            Ok(results) => flight.settle(|snapshot| {
                snapshot.contacts = results;
                snapshot.view = View::Search(query.to_string());
            }),
            Err(err) => flight.fail(FailedOperation::Search, &err),
        }
    }

    pub async fn filter_by_category(&self, category: &str) {
        let flight = InFlight::begin(&self.state);

        match self.store.filter_by_category(category).await {
            Ok(results) => flight.settle(|snapshot| {
                snapshot.contacts = results;
                snapshot.view = if category == CATEGORY_ALL {
                    View::All
                } else {
                    View::Category(category.to_string())
                };
            }),
            Err(err) => flight.fail(FailedOperation::Filter, &err),
        }
    }

    pub async fn clear_filters(&self) {
        self.refresh().await;
    }
}

/// Appends, unless a refresh that ran after the store write already brought
/// the record in.
fn upsert(contacts: &mut Vec<Contact>, contact: Contact) {
    match contacts.iter_mut().find(|c| c.id == contact.id) {
        Some(slot) => *slot = contact,
        None => contacts.push(contact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::demo_contacts;

    #[test]
    fn loading_follows_pending_count() {
        let mut snapshot = Snapshot::default();

        snapshot.acquire();
        snapshot.acquire();
        snapshot.release();
        assert!(snapshot.loading);

        snapshot.release();
        assert!(!snapshot.loading);
        snapshot.release();
        assert_eq!(snapshot.pending(), 0);
    }

    #[test]
    fn dropped_flight_releases_loading() {
        let (state, _rx) = watch::channel(Snapshot::default());

        let flight = InFlight::begin(&state);
        assert!(state.borrow().loading);

        drop(flight);
        assert!(!state.borrow().loading);
    }

    #[test]
    fn upsert_never_duplicates() {
        let mut contacts = demo_contacts();
        let mut john = contacts[0].clone();
        john.notes = Some("changed".to_string());

        upsert(&mut contacts, john);

        assert_eq!(contacts.len(), 5);
        assert_eq!(contacts[0].notes.as_deref(), Some("changed"));
    }

    #[test]
    fn failure_messages() {
        assert_eq!(FailedOperation::Fetch.to_string(), "Failed to fetch contacts");
        assert_eq!(FailedOperation::Filter.to_string(), "Failed to filter contacts");
    }
}
