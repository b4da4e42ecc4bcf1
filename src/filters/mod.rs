//! Filter selection and chip tokens
//!
//! A screen's filter editor produces a [`FilterSelection`]; applying it turns
//! the selection into a list of [`FilterToken`] chips that can be removed one
//! at a time. The two representations convert freely through [`codec`].
//!
//! # Token format
//!
//! `id = "<category>=<value>"`, for example `groupDifficulty=advanced`,
//! `tripTag=Hiking` or `groupStart=2026-10-18`. Tokens stay in memory; they are
//! never sent to the backend.
//!
//! # Examples
//!
//! ```
//! use hikemeet::filters::{FilterSelection, codec};
//!
//! let selection = FilterSelection::builder()
//!     .difficulty("advanced")
//!     .max_members("10")
//!     .build();
//!
//! let chips = codec::encode(&selection);
//! assert_eq!(chips[0].id, "groupDifficulty=advanced");
//! assert_eq!(codec::decode(&chips), selection);
//! ```

pub mod codec;
pub mod error;
pub mod types;

pub use error::FilterError;
pub use types::{Criterion, FilterCategory, FilterSelection, FilterSelectionBuilder, FilterToken};
