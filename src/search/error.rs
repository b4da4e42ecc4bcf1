//! Search-specific error types
//!
//! These errors surface from the async layer around the pure search core:
//! backend fetches, reading interactive input, and the channels that carry
//! debounced queries and fetch completions.

use thiserror::Error;

/// Search-specific errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// Backend request failed
    #[error("Backend error: {0}")]
    Api(#[from] crate::api::ApiError),

    /// Reading interactive input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A channel between the input loop and its tasks closed unexpectedly
    #[error("Search channel closed")]
    ChannelClosed,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
