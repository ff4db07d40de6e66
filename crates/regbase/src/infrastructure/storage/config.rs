//! TOML-based settings for the facade.
//!
//! Reads and writes [`Settings`] to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\RegBase\config.toml`
//! - Linux:    `~/.config/regbase/config.toml`
//! - macOS:    `~/Library/Application Support/RegBase/config.toml`
//!
//! Example:
//!
//! ```toml
//! [store]
//! hive = "current_user"
//! default_product = 0
//! view = "native"
//! backend = "file"
//! file_path = "/var/lib/regbase/store.toml"
//!
//! [logging]
//! log_level = "debug"
//! ```
//!
//! Every field has a default, so an empty or partial file is valid and a
//! missing file behaves like an empty one.

use std::path::{Path, PathBuf};

use regbase_core::{Hive, NamespaceRoot, ProductId, StoreView};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the settings file inside the config directory.
const SETTINGS_FILE_NAME: &str = "config.toml";
/// File name of the file-backed store inside the config directory.
const STORE_FILE_NAME: &str = "store.toml";

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The selected backend does not exist on this platform.
    #[error("store backend `{0}` is not available on this platform")]
    BackendUnavailable(BackendKind),
}

// ── Settings schema types ─────────────────────────────────────────────────────

/// Which host store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// The registry on Windows, the TOML file everywhere else.
    #[default]
    Auto,
    /// The Windows registry.
    Registry,
    /// The TOML file at [`StoreSettings::file_path`].
    File,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Registry => "registry",
            Self::File => "file",
        })
    }
}

/// Top-level settings stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// How the facade reaches the host store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreSettings {
    /// Hive of the initial namespace root.
    #[serde(default)]
    pub hive: Hive,
    /// Product whose base path the initial namespace root points at.
    #[serde(default)]
    pub default_product: ProductId,
    /// Store view addressed by every operation.
    #[serde(default)]
    pub view: StoreView,
    #[serde(default)]
    pub backend: BackendKind,
    /// Location of the file-backed store.  Defaults to `store.toml` next to
    /// the settings file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl StoreSettings {
    /// The namespace root a facade built from these settings starts with.
    ///
    /// A `default_product` outside the product table keeps the default base
    /// path, mirroring how unknown ids resolve at runtime.
    pub fn namespace_root(&self) -> NamespaceRoot {
        let mut root = NamespaceRoot {
            hive: self.hive,
            ..NamespaceRoot::default()
        };
        root.resolve(self.default_product);
        root
    }

    /// Path of the file-backed store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformConfigDir`] when no explicit path is
    /// configured and the platform directory cannot be determined.
    pub fn store_file_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.file_path {
            Some(path) => Ok(path.clone()),
            None => Ok(config_dir()?.join(STORE_FILE_NAME)),
        }
    }
}

// ── Settings repository ───────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the settings file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the settings file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join(SETTINGS_FILE_NAME))
}

/// Loads [`Settings`] from the platform settings file.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&config_file_path()?)
}

/// Loads [`Settings`] from `path`, returning `Settings::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `settings` to `path`, creating the directory if needed.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(settings)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Persists `settings` to the platform settings file.
pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    save_settings_to(&config_file_path()?, settings)
}

/// Resolves the platform config base directory including the `RegBase` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("RegBase"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("regbase"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("RegBase")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
