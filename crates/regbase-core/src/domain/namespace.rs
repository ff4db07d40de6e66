//! Namespace roots and container path composition.
//!
//! A [`NamespaceRoot`] is the hive + base path pair that all section/key
//! lookups are resolved against.  Appending an optional section gives a
//! [`ContainerPath`]; adding the store view gives the fully resolved
//! [`ContainerLocation`] handed to a host store.

use std::fmt;

use super::product::{ProductFamily, ProductId};
use super::scope::{Hive, StoreView};

/// Separator between path components (the registry's native separator).
pub const PATH_SEPARATOR: char = '\\';

/// The hive + base path currently used to resolve lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceRoot {
    pub hive: Hive,
    pub base_path: String,
}

impl NamespaceRoot {
    pub fn new(hive: Hive, base_path: impl Into<String>) -> Self {
        Self {
            hive,
            base_path: base_path.into(),
        }
    }

    /// Stateless lookup: the root for `product` in `hive`, or `None` for an
    /// id outside the product table.
    pub fn for_product(product: ProductId, hive: Hive) -> Option<Self> {
        product
            .family()
            .map(|family| Self::new(hive, family.base_path()))
    }

    /// Re-points this root at the family of `product`, keeping the hive.
    ///
    /// Unknown ids leave the root unchanged, so the last successfully
    /// resolved base path (or a path set by an explicit override) stays in
    /// effect.  Returns `true` when the id was recognised.
    pub fn resolve(&mut self, product: ProductId) -> bool {
        match product.family() {
            Some(family) => {
                if self.base_path != family.base_path() {
                    self.base_path = family.base_path().to_string();
                }
                true
            }
            None => false,
        }
    }

    /// Path of the container for `section` under this root.
    pub fn container(&self, section: Option<&str>) -> ContainerPath {
        ContainerPath::new(&self.base_path, section)
    }

    /// Fully resolved location of the container for `section`.
    pub fn locate(&self, section: Option<&str>, view: StoreView) -> ContainerLocation {
        ContainerLocation {
            hive: self.hive,
            path: self.container(section),
            view,
        }
    }
}

impl Default for NamespaceRoot {
    fn default() -> Self {
        Self::new(Hive::default(), ProductFamily::default().base_path())
    }
}

/// A container path relative to its hive, e.g.
/// `Software\Alachisoft\NCache\UserInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerPath(String);

impl ContainerPath {
    /// Joins `base` and an optional `section`.
    ///
    /// Separators around the section are trimmed; an empty section addresses
    /// the base container itself.
    pub fn new(base: &str, section: Option<&str>) -> Self {
        let base = base.trim_end_matches(PATH_SEPARATOR);
        match section
            .map(|s| s.trim_matches(PATH_SEPARATOR))
            .filter(|s| !s.is_empty())
        {
            Some(section) => Self(format!("{base}{PATH_SEPARATOR}{section}")),
            None => Self(base.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContainerPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A fully resolved container: hive, path, and store view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerLocation {
    pub hive: Hive,
    pub path: ContainerPath,
    pub view: StoreView,
}

impl fmt::Display for ContainerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.hive, PATH_SEPARATOR, self.path)?;
        if self.view == StoreView::Alternate {
            f.write_str(" (alternate view)")?;
        }
        Ok(())
    }
}
