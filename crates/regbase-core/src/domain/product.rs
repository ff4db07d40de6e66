//! Product-id → vendor base path table.
//!
//! Every setting lives under one of four vendor base paths.  Callers pass a
//! small integer product id; ids outside the table have no family and leave
//! the current namespace root untouched (see
//! [`NamespaceRoot::resolve`](crate::NamespaceRoot::resolve)).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Small integer selecting a product family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u16);

impl ProductId {
    /// The id every caller falls back to when nothing else is configured.
    pub const DEFAULT: ProductId = ProductId(0);

    /// Returns the product family for this id, or `None` for an id outside
    /// the table.
    pub fn family(self) -> Option<ProductFamily> {
        ProductFamily::from_id(self)
    }
}

impl From<u16> for ProductId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vendor product family with a fixed base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductFamily {
    NCache,
    NWebCache,
    TayzGrid,
    NosDb,
}

impl ProductFamily {
    /// All families, ordered by product id.
    pub const ALL: [ProductFamily; 4] = [
        ProductFamily::NCache,
        ProductFamily::NWebCache,
        ProductFamily::TayzGrid,
        ProductFamily::NosDb,
    ];

    pub fn from_id(id: ProductId) -> Option<Self> {
        Self::ALL.get(usize::from(id.0)).copied()
    }

    pub fn id(self) -> ProductId {
        match self {
            Self::NCache => ProductId(0),
            Self::NWebCache => ProductId(1),
            Self::TayzGrid => ProductId(2),
            Self::NosDb => ProductId(3),
        }
    }

    /// Base path of the family's container, relative to the hive.
    pub fn base_path(self) -> &'static str {
        match self {
            Self::NCache => r"Software\Alachisoft\NCache",
            Self::NWebCache => r"Software\Alachisoft\NWebCache",
            Self::TayzGrid => r"Software\Alachisoft\TayzGrid",
            Self::NosDb => r"Software\Alachisoft\NosDB",
        }
    }
}

impl Default for ProductFamily {
    fn default() -> Self {
        Self::NCache
    }
}
