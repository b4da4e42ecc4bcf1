//! HikeMeet - search, filter and paginate groups, trips and people
//!
//! This library provides the client-side search core of HikeMeet: a typed
//! filter selection with removable chip tokens, one predicate engine shared
//! by every screen, kind-composed result lists with stepped pagination, and a
//! thin async client for the backend endpoints that feed them.

use thiserror::Error;

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod filters;
pub mod models;
pub mod output;
pub mod search;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum HikeMeetError {
    /// Backend error
    #[error("Backend error: {0}")]
    ApiError(#[from] api::ApiError),
    /// Search error
    #[error("Search error: {0}")]
    SearchError(#[from] search::SearchError),
    /// Filter token error
    #[error("Filter error: {0}")]
    FilterError(#[from] filters::FilterError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
