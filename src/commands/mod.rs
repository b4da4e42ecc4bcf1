//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against a search backend.

pub mod filter;
pub mod interactive;
pub mod list;
pub mod search;

// Re-export execute functions for convenience
pub use filter::execute as filter;
pub use interactive::execute as interactive;
pub use list::{groups, trips};
pub use search::execute as search;
