pub use crate::cli::{Cli, Commands, run_app};
pub use crate::config::AppConfig;
pub use crate::controller::{ContactStateController, FailedOperation, Snapshot, View};
pub use crate::domain::{
    Category, Contact, ContactDraft, ContactId,
    search::CATEGORY_ALL,
    seed::demo_contacts,
};
pub use crate::errors::AppError;
pub use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageMedium};
pub use crate::store::{ContactStore, DEFAULT_LATENCY, DEFAULT_STORAGE_KEY, StoreConfig};
