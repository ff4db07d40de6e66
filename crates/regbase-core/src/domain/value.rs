//! Stored entry values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value of a single entry as held by the host store.
///
/// The facade itself only deals in strings and integers; an integer entry
/// read as a string is rendered as its decimal text via [`StoredValue::into_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    /// A text entry (`REG_SZ` in the registry).
    Text(String),
    /// A 32-bit integer entry (`REG_DWORD` in the registry).
    Int(i32),
}

impl StoredValue {
    /// Short name of the entry kind, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "int",
        }
    }

    /// The value as text; integers become their decimal representation.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Int(value) => value.to_string(),
        }
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for StoredValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}
