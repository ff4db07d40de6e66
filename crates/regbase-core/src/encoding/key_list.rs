//! Colon-terminated entry name lists.
//!
//! Key enumeration returns every entry name of a container packed into one
//! string, each name followed by [`KEY_LIST_SEPARATOR`]:
//!
//! ```rust
//! use regbase_core::{join_key_list, split_key_list};
//!
//! let packed = join_key_list(["a", "b", "c"]);
//! assert_eq!(packed, "a:b:c:");
//! assert_eq!(split_key_list(&packed).collect::<Vec<_>>(), ["a", "b", "c"]);
//! ```
//!
//! The trailing separator is part of the format.  Names that themselves
//! contain a colon cannot be told apart from two names; readers of the list
//! have always accepted that.

/// Terminator written after every name.
pub const KEY_LIST_SEPARATOR: char = ':';

/// Packs `names` into a single colon-terminated string.
pub fn join_key_list<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut packed = String::new();
    for name in names {
        packed.push_str(name.as_ref());
        packed.push(KEY_LIST_SEPARATOR);
    }
    packed
}

/// Splits a packed list back into names, skipping empty tokens.
pub fn split_key_list(packed: &str) -> impl Iterator<Item = &str> {
    packed
        .split(KEY_LIST_SEPARATOR)
        .filter(|token| !token.is_empty())
}
