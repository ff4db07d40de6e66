//! The settings facade.
//!
//! [`ConfigStore`] turns a logical `(product id, section, key)` triple into a
//! physical [`ContainerLocation`] and performs one typed read or write
//! against the injected [`HostStore`].
//!
//! # Resolution
//!
//! The store keeps a current [`NamespaceRoot`].  Every operation first
//! resolves its product id against that root: a known id re-points the base
//! path at the product family (the hive is kept), an unknown id leaves the
//! root as it was.  The resolved root is snapshotted once per call, so an
//! operation never sees a root that another thread changed halfway through.
//! Callers that need strict isolation between product ids use one
//! `ConfigStore` per id, or [`NamespaceRoot::for_product`] directly.
//!
//! # Failure policy
//!
//! - Reads never fail: anything that goes wrong (missing container, missing
//!   entry, I/O error, unparseable integer) yields the caller's default.
//!   Callers therefore cannot tell "absent" from "broken store"; the cause is
//!   logged instead.
//! - Writes report their error.  Nothing is retried.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use regbase_core::{
    join_key_list, parse_bool, parse_int, ContainerLocation, ContainerPath, Hive, NamespaceRoot,
    ProductId, StoreView, StoredValue,
};
use tracing::{debug, warn};

use super::host_store::{HostStore, StoreError};

/// Section holding license and registration details.
const USER_INFO_SECTION: &str = "UserInfo";
/// Entry name of the license key inside [`USER_INFO_SECTION`].
const LICENSE_KEY_ENTRY: &str = "licensekey";

/// Typed get/set access to vendor-scoped settings.
pub struct ConfigStore<S> {
    store: S,
    view: StoreView,
    root: Mutex<NamespaceRoot>,
}

impl<S: HostStore> ConfigStore<S> {
    /// Creates a facade over `store` with the default root
    /// (machine-wide hive, product 0) in the native view.
    pub fn new(store: S) -> Self {
        Self::with_root(store, NamespaceRoot::default(), StoreView::Native)
    }

    /// Creates a facade that addresses `view` of the store.
    pub fn with_view(store: S, view: StoreView) -> Self {
        Self::with_root(store, NamespaceRoot::default(), view)
    }

    pub fn with_root(store: S, root: NamespaceRoot, view: StoreView) -> Self {
        Self {
            store,
            view,
            root: Mutex::new(root),
        }
    }

    /// The underlying host store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> StoreView {
        self.view
    }

    /// Snapshot of the current namespace root.
    pub fn namespace_root(&self) -> NamespaceRoot {
        self.root.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Overrides the namespace root (base path and hive) unconditionally.
    ///
    /// The path is not validated.  A later call with a known product id
    /// replaces the base path again; the hive stays until the next override.
    pub fn set_namespace_root(&self, base_path: impl Into<String>, hive: Hive) {
        let root = NamespaceRoot::new(hive, base_path);
        debug!("namespace root overridden: {}\\{}", root.hive, root.base_path);
        *self.root.lock().unwrap_or_else(PoisonError::into_inner) = root;
    }

    /// Resolves `product` against the current root and returns the result.
    ///
    /// Unknown ids keep the last resolved base path.
    pub fn resolve_base(&self, product: ProductId) -> NamespaceRoot {
        let mut root = self.root.lock().unwrap_or_else(PoisonError::into_inner);
        if !root.resolve(product) {
            warn!(
                "unknown product id {product}; keeping base path {}",
                root.base_path
            );
        }
        root.clone()
    }

    fn locate(&self, section: Option<&str>, product: ProductId) -> ContainerLocation {
        self.resolve_base(product).locate(section, self.view)
    }

    /// `true` when the container for `section` can be opened for reading.
    pub fn container_exists(&self, section: Option<&str>, product: ProductId) -> bool {
        self.exists(&self.locate(section, product))
    }

    /// `true` when the container at `path` under `hive` can be opened for
    /// reading.  The path is taken as-is, ignoring the namespace root.
    pub fn container_exists_at(&self, hive: Hive, path: &str) -> bool {
        self.exists(&ContainerLocation {
            hive,
            path: ContainerPath::new(path, None),
            view: self.view,
        })
    }

    fn exists(&self, location: &ContainerLocation) -> bool {
        match self.store.open_container(location) {
            Ok(()) => true,
            Err(e) => {
                log_read_failure(location, None, &e);
                false
            }
        }
    }

    fn read(&self, location: &ContainerLocation, key: &str) -> Option<StoredValue> {
        match self.store.read_entry(location, key) {
            Ok(value) => Some(value),
            Err(e) => {
                log_read_failure(location, Some(key), &e);
                None
            }
        }
    }

    /// Reads `key` as text, or returns `default` if it cannot be read.
    ///
    /// Integer entries are returned as their decimal text.
    pub fn get_string(
        &self,
        section: Option<&str>,
        key: &str,
        default: &str,
        product: ProductId,
    ) -> String {
        let location = self.locate(section, product);
        self.read(&location, key)
            .map(StoredValue::into_text)
            .unwrap_or_else(|| default.to_string())
    }

    /// Reads `key` as an integer, or returns `default`.
    ///
    /// Text entries are parsed as base-10; text that does not parse also
    /// yields `default`.
    pub fn get_int(
        &self,
        section: Option<&str>,
        key: &str,
        default: i32,
        product: ProductId,
    ) -> i32 {
        let location = self.locate(section, product);
        match self.read(&location, key) {
            Some(StoredValue::Int(value)) => value,
            Some(StoredValue::Text(text)) => parse_int(&text).unwrap_or_else(|| {
                warn!("entry `{key}` in {location} is not an integer: {text:?}");
                default
            }),
            None => default,
        }
    }

    /// Writes `value` as a text entry, creating the container if needed.
    pub fn set_string(
        &self,
        section: Option<&str>,
        key: &str,
        value: &str,
        product: ProductId,
    ) -> Result<(), StoreError> {
        self.write(section, key, StoredValue::from(value), product)
    }

    /// Writes `value` as a 32-bit integer entry, creating the container if needed.
    pub fn set_int(
        &self,
        section: Option<&str>,
        key: &str,
        value: i32,
        product: ProductId,
    ) -> Result<(), StoreError> {
        self.write(section, key, StoredValue::Int(value), product)
    }

    fn write(
        &self,
        section: Option<&str>,
        key: &str,
        value: StoredValue,
        product: ProductId,
    ) -> Result<(), StoreError> {
        let location = self.locate(section, product);
        self.store
            .write_entry(&location, key, &value)
            .map_err(|e| {
                warn!("failed to write `{key}` in {location}: {e}");
                e
            })?;
        debug!("wrote {} entry `{key}` in {location}", value.kind());
        Ok(())
    }

    /// Names of every entry in the container, each followed by `:`
    /// (`"a:b:c:"`), or `default` if the container cannot be opened.
    ///
    /// `_key` is accepted for compatibility with existing callers and is
    /// ignored: the whole container is always listed.
    pub fn get_keys(
        &self,
        section: Option<&str>,
        _key: &str,
        default: &str,
        product: ProductId,
    ) -> String {
        let location = self.locate(section, product);
        match self.store.entry_names(&location) {
            Ok(names) => join_key_list(names),
            Err(e) => {
                log_read_failure(&location, None, &e);
                default.to_string()
            }
        }
    }

    /// All entries of the container as text, keyed by entry name.
    ///
    /// Entries that disappear between listing and reading come back as
    /// empty strings.  A missing container yields an empty map.
    pub fn get_values(&self, section: Option<&str>, product: ProductId) -> BTreeMap<String, String> {
        let location = self.locate(section, product);
        self.read_all(&location)
            .map(|(name, value)| (name, value.map(StoredValue::into_text).unwrap_or_default()))
            .collect()
    }

    /// All entries of the container interpreted as booleans.
    ///
    /// Accepts `true`/`false` in any case and integers (non-zero is `true`).
    /// Entries that are neither are left out.
    pub fn get_bool_values(
        &self,
        section: Option<&str>,
        product: ProductId,
    ) -> BTreeMap<String, bool> {
        let location = self.locate(section, product);
        self.read_all(&location)
            .filter_map(|(name, value)| {
                let text = value.map(StoredValue::into_text).unwrap_or_default();
                match parse_bool(&text) {
                    Some(flag) => Some((name, flag)),
                    None => {
                        warn!("entry `{name}` in {location} is not a boolean: {text:?}");
                        None
                    }
                }
            })
            .collect()
    }

    fn read_all<'a>(
        &'a self,
        location: &'a ContainerLocation,
    ) -> impl Iterator<Item = (String, Option<StoredValue>)> + 'a {
        let names = self.store.entry_names(location).unwrap_or_else(|e| {
            log_read_failure(location, None, &e);
            Vec::new()
        });
        names
            .into_iter()
            .filter(|name| !name.is_empty())
            .map(move |name| {
                let value = self.read(location, &name);
                (name, value)
            })
    }

    /// Writes every pair as a text entry, stopping at the first failure.
    pub fn set_values<I, K, V>(
        &self,
        section: Option<&str>,
        values: I,
        product: ProductId,
    ) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let location = self.locate(section, product);
        for (key, value) in values {
            let value = StoredValue::from(value.as_ref());
            if let Err(e) = self.store.write_entry(&location, key.as_ref(), &value) {
                warn!("failed to write `{}` in {location}: {e}", key.as_ref());
                return Err(e);
            }
        }
        Ok(())
    }

    /// The license key stored for `product`, if any.
    pub fn license_key(&self, product: ProductId) -> Option<String> {
        Some(self.get_string(Some(USER_INFO_SECTION), LICENSE_KEY_ENTRY, "", product))
            .filter(|key| !key.is_empty())
    }
}

fn log_read_failure(location: &ContainerLocation, key: Option<&str>, error: &StoreError) {
    let target = key.map_or_else(|| location.to_string(), |k| format!("`{k}` in {location}"));
    if error.is_absent() {
        debug!("{target} not present: {error}");
    } else {
        warn!("reading {target} failed: {error}");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
