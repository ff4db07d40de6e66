//! Registry-shaped entry tree shared by the in-memory and file backends.
//!
//! The tree is keyed hive → view → container path → entry name.  Lookups
//! follow registry semantics:
//!
//! - container paths and entry names compare case-insensitively, and the
//!   first spelling written is the one kept;
//! - a container exists implicitly when any descendant container exists
//!   (creating `A\B\C` also creates `A` and `A\B`);
//! - entries enumerate in name order;
//! - entries hold raw TOML values, so a hand-edited document with a boolean,
//!   float or out-of-range integer still loads.  Only reading that one entry
//!   fails, with [`StoreError::UnsupportedType`].

use std::collections::BTreeMap;

use regbase_core::{ContainerLocation, StoredValue, PATH_SEPARATOR};
use serde::{Deserialize, Serialize};
use toml::Value;

use crate::application::host_store::StoreError;

/// Entries of a single container.
pub type Entries = BTreeMap<String, Value>;

type Containers = BTreeMap<String, Entries>;

/// The whole store: hive → view → container path → entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryTree(BTreeMap<String, BTreeMap<String, Containers>>);

/// Finds the stored spelling of `wanted` among `keys`, ignoring ASCII case.
fn find_key<'a, V>(map: &'a BTreeMap<String, V>, wanted: &str) -> Option<&'a String> {
    map.keys().find(|k| k.eq_ignore_ascii_case(wanted))
}

fn decode(
    location: &ContainerLocation,
    name: &str,
    raw: &Value,
) -> Result<StoredValue, StoreError> {
    match raw {
        Value::String(text) => Ok(StoredValue::Text(text.clone())),
        Value::Integer(number) => i32::try_from(*number)
            .map(StoredValue::Int)
            .map_err(|_| unsupported(location, name, "integer out of 32-bit range")),
        other => Err(unsupported(location, name, other.type_str())),
    }
}

fn encode(value: StoredValue) -> Value {
    match value {
        StoredValue::Text(text) => Value::String(text),
        StoredValue::Int(number) => Value::Integer(i64::from(number)),
    }
}

fn unsupported(location: &ContainerLocation, name: &str, kind: &str) -> StoreError {
    StoreError::UnsupportedType {
        path: location.path.clone(),
        name: name.to_string(),
        kind: kind.to_string(),
    }
}

fn is_descendant(candidate: &str, ancestor: &str) -> bool {
    candidate.len() > ancestor.len()
        && candidate.as_bytes()[ancestor.len()] == PATH_SEPARATOR as u8
        && candidate[..ancestor.len()].eq_ignore_ascii_case(ancestor)
}

impl EntryTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn containers(&self, location: &ContainerLocation) -> Option<&Containers> {
        self.0
            .get(location.hive.as_str())
            .and_then(|views| views.get(location.view.as_str()))
    }

    /// Looks up a container.
    ///
    /// Returns `Ok(None)` for a container that only exists implicitly
    /// through a descendant, and [`StoreError::ContainerNotFound`] when
    /// there is nothing at or below `location`.
    pub fn lookup(&self, location: &ContainerLocation) -> Result<Option<&Entries>, StoreError> {
        let wanted = location.path.as_str();
        let not_found = || StoreError::ContainerNotFound {
            path: location.path.clone(),
        };
        let containers = self.containers(location).ok_or_else(not_found)?;

        if let Some(key) = find_key(containers, wanted) {
            return Ok(containers.get(key));
        }
        if containers.keys().any(|k| is_descendant(k, wanted)) {
            return Ok(None);
        }
        Err(not_found())
    }

    pub fn contains_container(&self, location: &ContainerLocation) -> bool {
        self.lookup(location).is_ok()
    }

    pub fn read(&self, location: &ContainerLocation, name: &str) -> Result<StoredValue, StoreError> {
        let raw = self
            .lookup(location)?
            .and_then(|entries| find_key(entries, name).and_then(|k| entries.get(k)))
            .ok_or_else(|| StoreError::EntryNotFound {
                path: location.path.clone(),
                name: name.to_string(),
            })?;
        decode(location, name, raw)
    }

    pub fn names(&self, location: &ContainerLocation) -> Result<Vec<String>, StoreError> {
        Ok(self
            .lookup(location)?
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default())
    }

    /// Creates the container if needed and stores `value` under `name`.
    pub fn write(&mut self, location: &ContainerLocation, name: &str, value: StoredValue) {
        let containers = self
            .0
            .entry(location.hive.as_str().to_string())
            .or_default()
            .entry(location.view.as_str().to_string())
            .or_default();

        let container_key = find_key(containers, location.path.as_str())
            .cloned()
            .unwrap_or_else(|| location.path.as_str().to_string());
        let entries = containers.entry(container_key).or_default();

        let entry_key = find_key(entries, name)
            .cloned()
            .unwrap_or_else(|| name.to_string());
        entries.insert(entry_key, encode(value));
    }
}
