//! Infrastructure layer of the settings facade.
//!
//! Contains OS-facing adapters: the host store backends (Windows registry,
//! TOML document, in-memory) and the settings file that configures them.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `regbase_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.

pub mod host_store;
pub mod storage;
