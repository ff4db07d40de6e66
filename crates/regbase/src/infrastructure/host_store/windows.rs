//! Windows registry host store.
//!
//! Each call opens the container with `RegOpenKeyEx` / `RegCreateKeyEx`
//! (through `winreg`), performs one read, write, or enumeration, and drops
//! the key, which closes the handle on every exit path.
//!
//! # Views
//!
//! [`StoreView::Alternate`] adds `KEY_WOW64_32KEY` to the access mask in a
//! 64-bit build and `KEY_WOW64_64KEY` in a 32-bit build, so the alternate
//! view is always the one the running process would not see by default.

#![cfg(target_os = "windows")]

use std::io;

use regbase_core::{ContainerLocation, Hive, StoreView, StoredValue};
use tracing::debug;
use winreg::enums::{
    RegType, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WOW64_32KEY, KEY_WOW64_64KEY,
    KEY_WRITE,
};
use winreg::types::FromRegValue;
use winreg::{RegKey, RegValue};

use crate::application::host_store::{HostStore, StoreError};

/// [`HostStore`] backed by the Windows registry.
#[derive(Debug, Default)]
pub struct RegistryStore;

impl RegistryStore {
    pub fn new() -> Self {
        Self
    }
}

fn hive_key(hive: Hive) -> RegKey {
    match hive {
        Hive::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
        Hive::CurrentUser => RegKey::predef(HKEY_CURRENT_USER),
    }
}

fn view_flag(view: StoreView) -> u32 {
    match view {
        StoreView::Native => 0,
        StoreView::Alternate if cfg!(target_pointer_width = "64") => KEY_WOW64_32KEY,
        StoreView::Alternate => KEY_WOW64_64KEY,
    }
}

fn container_error(location: &ContainerLocation, source: io::Error) -> StoreError {
    if source.kind() == io::ErrorKind::NotFound {
        StoreError::ContainerNotFound {
            path: location.path.clone(),
        }
    } else {
        StoreError::Io {
            path: location.path.clone(),
            source,
        }
    }
}

fn entry_error(location: &ContainerLocation, name: &str, source: io::Error) -> StoreError {
    if source.kind() == io::ErrorKind::NotFound {
        StoreError::EntryNotFound {
            path: location.path.clone(),
            name: name.to_string(),
        }
    } else {
        StoreError::Io {
            path: location.path.clone(),
            source,
        }
    }
}

fn open(location: &ContainerLocation) -> Result<RegKey, StoreError> {
    hive_key(location.hive)
        .open_subkey_with_flags(location.path.as_str(), KEY_READ | view_flag(location.view))
        .map_err(|e| container_error(location, e))
}

/// Converts a raw registry value into the facade's value model.
fn decode(
    location: &ContainerLocation,
    name: &str,
    raw: &RegValue,
) -> Result<StoredValue, StoreError> {
    let decoded = match raw.vtype {
        RegType::REG_SZ | RegType::REG_EXPAND_SZ => {
            String::from_reg_value(raw).map(StoredValue::Text)
        }
        // DWORDs hold the two's-complement bit pattern of the i32 written by set_int.
        RegType::REG_DWORD => u32::from_reg_value(raw).map(|v| StoredValue::Int(v as i32)),
        RegType::REG_QWORD => u64::from_reg_value(raw).map(|v| {
            let signed = v as i64;
            i32::try_from(signed)
                .map_or_else(|_| StoredValue::Text(signed.to_string()), StoredValue::Int)
        }),
        ref other => {
            return Err(StoreError::UnsupportedType {
                path: location.path.clone(),
                name: name.to_string(),
                kind: format!("{other:?}"),
            })
        }
    };
    decoded.map_err(|source| StoreError::Io {
        path: location.path.clone(),
        source,
    })
}

impl HostStore for RegistryStore {
    fn open_container(&self, location: &ContainerLocation) -> Result<(), StoreError> {
        open(location).map(drop)
    }

    fn read_entry(
        &self,
        location: &ContainerLocation,
        name: &str,
    ) -> Result<StoredValue, StoreError> {
        let key = open(location)?;
        let raw = key
            .get_raw_value(name)
            .map_err(|e| entry_error(location, name, e))?;
        decode(location, name, &raw)
    }

    fn write_entry(
        &self,
        location: &ContainerLocation,
        name: &str,
        value: &StoredValue,
    ) -> Result<(), StoreError> {
        let (key, _) = hive_key(location.hive)
            .create_subkey_with_flags(location.path.as_str(), KEY_WRITE | view_flag(location.view))
            .map_err(|e| container_error(location, e))?;
        debug!("opened {location} for write");

        let written = match value {
            StoredValue::Text(text) => key.set_value(name, text),
            StoredValue::Int(number) => key.set_value(name, &(*number as u32)),
        };
        written.map_err(|source| StoreError::Io {
            path: location.path.clone(),
            source,
        })
    }

    fn entry_names(&self, location: &ContainerLocation) -> Result<Vec<String>, StoreError> {
        let key = open(location)?;
        key.enum_values()
            .map(|item| {
                item.map(|(name, _)| name).map_err(|source| StoreError::Io {
                    path: location.path.clone(),
                    source,
                })
            })
            .collect()
    }
}
