//! Error types for filter token parsing
//!
//! Only user-typed tokens can fail. Decoding a token list that came from
//! [`encode`](super::codec::encode) never errors; unknown categories there are skipped.

use thiserror::Error;

/// Errors that can occur while parsing a filter token typed by a user
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// Token has no `=` between category and value
    #[error("Filter '{0}' must look like <category>=<value>")]
    MissingSeparator(String),

    /// Token value is empty or whitespace
    #[error("Filter '{0}' has an empty value")]
    EmptyValue(String),

    /// Category key is not one of the known filter categories
    #[error("Unknown filter category '{0}'")]
    UnknownCategory(String),
}
