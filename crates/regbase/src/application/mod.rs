//! Application layer of the settings facade.
//!
//! # Sub-modules
//!
//! - **`host_store`**   – The [`host_store::HostStore`] port: the handful of
//!   open/read/write/enumerate primitives the facade needs from the host
//!   store, plus the [`host_store::StoreError`] taxonomy.
//!
//! - **`config_store`** – The [`config_store::ConfigStore`] facade: product id
//!   resolution, container path composition, typed get/set with default
//!   fallback, and key enumeration.
//!
//! Nothing here touches the registry or the file system directly; backends
//! live in `infrastructure::host_store` and are injected at construction.

pub mod config_store;
pub mod host_store;
