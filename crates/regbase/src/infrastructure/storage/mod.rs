//! Storage infrastructure: the facade's own settings file.
//!
//! The `config` sub-module handles:
//!
//! - Reading the TOML settings file from the platform-appropriate directory.
//! - Writing it back when a tool changes a setting.
//! - Providing defaults when the file does not exist yet (first run).
//!
//! These settings decide *how* the facade reaches the host store (hive,
//! default product, view, backend).  The settings that the facade stores on
//! behalf of other components live in the host store itself.

pub mod config;
