//! The host store port.

use std::io;
use std::path::PathBuf;

use regbase_core::{ContainerLocation, ContainerPath, StoredValue};
use thiserror::Error;

/// Errors reported by a [`HostStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The container does not exist.
    #[error("container not found: {path}")]
    ContainerNotFound { path: ContainerPath },

    /// The container exists but holds no entry with this name.
    #[error("entry `{name}` not found in {path}")]
    EntryNotFound { path: ContainerPath, name: String },

    /// The entry holds a value that is neither text nor an integer.
    #[error("entry `{name}` in {path} has unsupported type {kind}")]
    UnsupportedType {
        path: ContainerPath,
        name: String,
        kind: String,
    },

    /// The store rejected the operation (permissions, corruption, quota).
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: ContainerPath,
        #[source]
        source: io::Error,
    },

    /// The file holding the store could not be read or written.
    #[error("I/O error accessing store file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file holding the store is not a valid store document.
    #[error("store file {path} is unusable: {reason}")]
    Document { path: PathBuf, reason: String },
}

impl StoreError {
    /// `true` when the error only means "nothing is stored there".
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            Self::ContainerNotFound { .. } | Self::EntryNotFound { .. }
        )
    }
}

/// Primitives the facade needs from the host's hierarchical store.
///
/// Every call is self-contained: implementations acquire whatever handle
/// they need, use it once, and release it before returning, on error paths
/// too.  The production implementations are the Windows registry and a TOML
/// document; tests use [`InMemoryStore`](crate::infrastructure::host_store::memory::InMemoryStore)
/// or a mock.
#[cfg_attr(test, mockall::automock)]
pub trait HostStore: Send + Sync {
    /// Opens the container for read access and immediately releases it.
    fn open_container(&self, location: &ContainerLocation) -> Result<(), StoreError>;

    /// Reads one entry.
    fn read_entry(&self, location: &ContainerLocation, name: &str)
        -> Result<StoredValue, StoreError>;

    /// Creates the container if absent, then writes one entry.
    fn write_entry(
        &self,
        location: &ContainerLocation,
        name: &str,
        value: &StoredValue,
    ) -> Result<(), StoreError>;

    /// Names of all entries in the container, in the store's native order.
    fn entry_names(&self, location: &ContainerLocation) -> Result<Vec<String>, StoreError>;
}

impl<T: HostStore + ?Sized> HostStore for Box<T> {
    fn open_container(&self, location: &ContainerLocation) -> Result<(), StoreError> {
        (**self).open_container(location)
    }

    fn read_entry(
        &self,
        location: &ContainerLocation,
        name: &str,
    ) -> Result<StoredValue, StoreError> {
        (**self).read_entry(location, name)
    }

    fn write_entry(
        &self,
        location: &ContainerLocation,
        name: &str,
        value: &StoredValue,
    ) -> Result<(), StoreError> {
        (**self).write_entry(location, name, value)
    }

    fn entry_names(&self, location: &ContainerLocation) -> Result<Vec<String>, StoreError> {
        (**self).entry_names(location)
    }
}
