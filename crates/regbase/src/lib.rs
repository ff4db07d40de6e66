//! regbase library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.

pub mod application;
pub mod infrastructure;

pub use application::config_store::ConfigStore;
pub use application::host_store::{HostStore, StoreError};
pub use regbase_core::{Hive, NamespaceRoot, ProductId, StoreView, StoredValue};
