//! HikeMeet backend access
//!
//! A thin async REST client over the list and search endpoints the search
//! screens use. Everything else the backend offers (auth, CRUD, media) is
//! outside this crate.

pub mod client;
pub mod error;

pub use client::{ApiClient, SearchSource};
pub use error::ApiError;
