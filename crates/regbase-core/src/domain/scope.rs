//! Top-level scopes of the host store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a hive or view name cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseScopeError {
    #[error("unknown hive `{0}` (expected `local_machine` or `current_user`)")]
    UnknownHive(String),

    #[error("unknown store view `{0}` (expected `native` or `alternate`)")]
    UnknownView(String),
}

/// A top-level scope of the hierarchical store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hive {
    /// Machine-wide settings (`HKEY_LOCAL_MACHINE`).
    LocalMachine,
    /// Settings of the user running the process (`HKEY_CURRENT_USER`).
    CurrentUser,
}

impl Hive {
    /// The snake_case name used in settings files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LocalMachine => "local_machine",
            Self::CurrentUser => "current_user",
        }
    }
}

impl Default for Hive {
    fn default() -> Self {
        Self::LocalMachine
    }
}

impl fmt::Display for Hive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hive {
    type Err = ParseScopeError;

    /// Accepts the snake_case names plus the registry abbreviations
    /// `HKLM` / `HKCU` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local_machine" | "hklm" | "hkey_local_machine" => Ok(Self::LocalMachine),
            "current_user" | "hkcu" | "hkey_current_user" => Ok(Self::CurrentUser),
            _ => Err(ParseScopeError::UnknownHive(s.to_string())),
        }
    }
}

/// Which view of the store to address.
///
/// 64-bit Windows keeps separate registry views for 32-bit and 64-bit
/// programs.  `Native` is the view matching the running binary; `Alternate`
/// is the other one.  Backends without such a split still keep the two views
/// apart so that behaviour is identical everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreView {
    Native,
    Alternate,
}

impl StoreView {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Alternate => "alternate",
        }
    }

    /// Maps the legacy "use the alternate view" flag onto a view.
    pub fn from_alternate_flag(alternate: bool) -> Self {
        if alternate {
            Self::Alternate
        } else {
            Self::Native
        }
    }
}

impl Default for StoreView {
    fn default() -> Self {
        Self::Native
    }
}

impl fmt::Display for StoreView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreView {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "alternate" => Ok(Self::Alternate),
            _ => Err(ParseScopeError::UnknownView(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hive_default_is_local_machine() {
        assert_eq!(Hive::default(), Hive::LocalMachine);
    }

    #[test]
    fn test_hive_parses_snake_case_and_abbreviations() {
        assert_eq!("local_machine".parse::<Hive>(), Ok(Hive::LocalMachine));
        assert_eq!("HKLM".parse::<Hive>(), Ok(Hive::LocalMachine));
        assert_eq!("current_user".parse::<Hive>(), Ok(Hive::CurrentUser));
        assert_eq!("hkcu".parse::<Hive>(), Ok(Hive::CurrentUser));
    }

    #[test]
    fn test_hive_parse_rejects_unknown_name() {
        let result = "HKEY_CLASSES_ROOT".parse::<Hive>();
        assert_eq!(
            result,
            Err(ParseScopeError::UnknownHive("HKEY_CLASSES_ROOT".to_string()))
        );
    }

    #[test]
    fn test_hive_display_matches_parse_input() {
        for hive in [Hive::LocalMachine, Hive::CurrentUser] {
            assert_eq!(hive.to_string().parse::<Hive>(), Ok(hive));
        }
    }

    #[test]
    fn test_store_view_from_alternate_flag() {
        assert_eq!(StoreView::from_alternate_flag(false), StoreView::Native);
        assert_eq!(StoreView::from_alternate_flag(true), StoreView::Alternate);
    }

    #[test]
    fn test_store_view_parse_rejects_unknown_name() {
        assert!("wow64".parse::<StoreView>().is_err());
    }
}
