//! Host store backends.
//!
//! | Module    | Where            | Backing                                    |
//! |-----------|------------------|--------------------------------------------|
//! | `windows` | Windows          | The registry, via `winreg`                 |
//! | `file`    | every platform   | One TOML document on disk                  |
//! | `memory`  | every platform   | Process memory; used by tests              |
//!
//! `memory` and `tree` are always compiled (not guarded by `#[cfg]`) so tests
//! on any platform can use them.  [`open_native_store`] picks the backend the
//! settings ask for.

use tracing::info;

use super::storage::config::{BackendKind, ConfigError, StoreSettings};
use crate::application::host_store::HostStore;

pub mod file;
pub mod memory;
pub mod tree;

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

/// Opens the host store selected by `settings`.
///
/// `Auto` means the registry on Windows and the TOML file elsewhere.
///
/// # Errors
///
/// Returns [`ConfigError::BackendUnavailable`] when `Registry` is requested
/// on a platform without one, and [`ConfigError::NoPlatformConfigDir`] when
/// the file backend has no path to use.
pub fn open_native_store(settings: &StoreSettings) -> Result<Box<dyn HostStore>, ConfigError> {
    match settings.backend {
        BackendKind::File => open_file_store(settings),
        BackendKind::Registry | BackendKind::Auto => open_registry_store(settings),
    }
}

fn open_file_store(settings: &StoreSettings) -> Result<Box<dyn HostStore>, ConfigError> {
    let path = settings.store_file_path()?;
    info!("using file-backed store at {}", path.display());
    Ok(Box::new(file::FileStore::new(path)))
}

#[cfg(target_os = "windows")]
fn open_registry_store(_settings: &StoreSettings) -> Result<Box<dyn HostStore>, ConfigError> {
    info!("using the Windows registry");
    Ok(Box::new(windows::RegistryStore::new()))
}

#[cfg(not(target_os = "windows"))]
fn open_registry_store(settings: &StoreSettings) -> Result<Box<dyn HostStore>, ConfigError> {
    match settings.backend {
        BackendKind::Auto => open_file_store(settings),
        other => Err(ConfigError::BackendUnavailable(other)),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_file_backend_is_available_everywhere() {
        let settings = StoreSettings {
            backend: BackendKind::File,
            file_path: Some(PathBuf::from("unused-store.toml")),
            ..StoreSettings::default()
        };
        assert!(open_native_store(&settings).is_ok());
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_registry_backend_is_unavailable_off_windows() {
        let settings = StoreSettings {
            backend: BackendKind::Registry,
            ..StoreSettings::default()
        };
        assert!(matches!(
            open_native_store(&settings),
            Err(ConfigError::BackendUnavailable(BackendKind::Registry))
        ));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_auto_backend_falls_back_to_file_off_windows() {
        let settings = StoreSettings {
            file_path: Some(PathBuf::from("unused-store.toml")),
            ..StoreSettings::default()
        };
        assert!(open_native_store(&settings).is_ok());
    }
}
