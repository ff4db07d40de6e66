//! In-memory host store.
//!
//! Always compiled (not guarded by `#[cfg]`) so tests on any platform can
//! exercise the facade without touching the registry or the file system.
//! Clones share the same tree, which lets a test hand one clone to a
//! [`ConfigStore`](crate::ConfigStore) and inspect the other.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use regbase_core::{ContainerLocation, StoredValue};

use super::tree::EntryTree;
use crate::application::host_store::{HostStore, StoreError};

/// A [`HostStore`] that keeps everything in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tree: Arc<Mutex<EntryTree>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `tree`.
    pub fn with_tree(tree: EntryTree) -> Self {
        Self {
            tree: Arc::new(Mutex::new(tree)),
        }
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> EntryTree {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, EntryTree> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostStore for InMemoryStore {
    fn open_container(&self, location: &ContainerLocation) -> Result<(), StoreError> {
        self.lock().lookup(location).map(|_| ())
    }

    fn read_entry(
        &self,
        location: &ContainerLocation,
        name: &str,
    ) -> Result<StoredValue, StoreError> {
        self.lock().read(location, name)
    }

    fn write_entry(
        &self,
        location: &ContainerLocation,
        name: &str,
        value: &StoredValue,
    ) -> Result<(), StoreError> {
        self.lock().write(location, name, value.clone());
        Ok(())
    }

    fn entry_names(&self, location: &ContainerLocation) -> Result<Vec<String>, StoreError> {
        self.lock().names(location)
    }
}
