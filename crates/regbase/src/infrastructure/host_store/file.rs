//! TOML-file host store.
//!
//! Used on hosts without a registry, or anywhere when the settings select
//! `backend = "file"`.  The whole store is one TOML document:
//!
//! ```toml
//! [local_machine.native.'Software\Alachisoft\NCache\UserInfo']
//! AuthCode = "ABC123"
//! MaxConns = 500
//! ```
//!
//! Every call reads the document from disk; every write rewrites it through
//! a temporary file followed by a rename, so readers never see a half-written
//! document.  Calls on one `FileStore` are serialized with a mutex.  There is
//! no locking between processes.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use regbase_core::{ContainerLocation, StoredValue};
use tracing::debug;

use super::tree::EntryTree;
use crate::application::host_store::{HostStore, StoreError};

/// A [`HostStore`] persisted as a TOML document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store backed by `path`.  The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_error(&self, source: io::Error) -> StoreError {
        StoreError::File {
            path: self.path.clone(),
            source,
        }
    }

    fn load(&self) -> Result<EntryTree, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => toml::from_str(&content).map_err(|e| StoreError::Document {
                path: self.path.clone(),
                reason: e.to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(EntryTree::new()),
            Err(e) => Err(self.file_error(e)),
        }
    }

    fn save(&self, tree: &EntryTree) -> Result<(), StoreError> {
        let content = toml::to_string_pretty(tree).map_err(|e| StoreError::Document {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| self.file_error(e))?;
        }

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        std::fs::write(&staging, content).map_err(|e| self.file_error(e))?;
        std::fs::rename(&staging, &self.path).map_err(|e| self.file_error(e))?;
        debug!("saved store file {}", self.path.display());
        Ok(())
    }

    fn with_tree<T>(
        &self,
        f: impl FnOnce(&EntryTree) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);
        f(&self.load()?)
    }
}

impl HostStore for FileStore {
    fn open_container(&self, location: &ContainerLocation) -> Result<(), StoreError> {
        self.with_tree(|tree| tree.lookup(location).map(|_| ()))
    }

    fn read_entry(
        &self,
        location: &ContainerLocation,
        name: &str,
    ) -> Result<StoredValue, StoreError> {
        self.with_tree(|tree| tree.read(location, name))
    }

    fn write_entry(
        &self,
        location: &ContainerLocation,
        name: &str,
        value: &StoredValue,
    ) -> Result<(), StoreError> {
        let _guard = self.io_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut tree = self.load()?;
        tree.write(location, name, value.clone());
        self.save(&tree)
    }

    fn entry_names(&self, location: &ContainerLocation) -> Result<Vec<String>, StoreError> {
        self.with_tree(|tree| tree.names(location))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
