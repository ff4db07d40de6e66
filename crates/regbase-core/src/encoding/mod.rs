//! Text encodings shared by the facade and its callers.

pub mod key_list;
pub mod scalar;
