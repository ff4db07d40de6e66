//! Domain entities for RegBase.
//!
//! This module contains pure lookup and path logic with no infrastructure
//! dependencies.  It compiles and tests identically on every platform.
//!
//! # Sub-modules
//!
//! - **`scope`**     – [`scope::Hive`] and [`scope::StoreView`], the two
//!   top-level selectors of the host store.
//! - **`product`**   – The fixed product-id → vendor base path table.
//! - **`namespace`** – Namespace roots and container path composition.
//! - **`value`**     – The text/integer entry model.

pub mod namespace;
pub mod product;
pub mod scope;
pub mod value;
