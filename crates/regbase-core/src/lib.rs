//! # regbase-core
//!
//! Shared library for RegBase containing the product-family table, namespace
//! roots, container path composition, and the value encodings used by the
//! settings facade.
//!
//! This crate has zero dependencies on OS APIs.  Everything that touches the
//! Windows registry or the file system lives in the `regbase` crate.
//!
//! # Architecture overview (for beginners)
//!
//! RegBase persists small scalar settings (install directories, ports,
//! license codes) in the host's hierarchical key-value store.  A setting is
//! addressed by three things:
//!
//! - a **product id**, which picks one of four vendor base paths such as
//!   `Software\Alachisoft\NCache`;
//! - an optional **section**, a sub-path under that base (e.g. `UserInfo`);
//! - a **key**, the entry name inside the resulting container.
//!
//! This crate (`regbase-core`) defines:
//!
//! - **`domain`** – Hives, the product table, the store view flag, namespace
//!   roots, and the fully resolved [`ContainerLocation`].
//!
//! - **`encoding`** – How several entry names are packed into the single
//!   colon-terminated string returned by key enumeration, and how stored
//!   text is interpreted as integers and booleans.

pub mod domain;
pub mod encoding;

pub use domain::namespace::{ContainerLocation, ContainerPath, NamespaceRoot, PATH_SEPARATOR};
pub use domain::product::{ProductFamily, ProductId};
pub use domain::scope::{Hive, ParseScopeError, StoreView};
pub use domain::value::StoredValue;
pub use encoding::key_list::{join_key_list, split_key_list, KEY_LIST_SEPARATOR};
pub use encoding::scalar::{parse_bool, parse_int};
