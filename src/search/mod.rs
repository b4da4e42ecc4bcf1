//! Search, filter and paginate over backend collections
//!
//! The pure core:
//! 1. [`filter`] narrows groups and trips by a filter selection
//! 2. [`aggregate`] composes people, groups and trips for the selected kind
//! 3. [`paginate`] exposes stepped "show more" slicing
//!
//! Around it sit the screen sessions ([`listing`], [`session`]), the
//! [`debounce`] timer and response [`sequence`] guard, and the [`driver`]
//! steps that fetch from a backend and apply the result.

pub mod aggregate;
pub mod debounce;
pub mod driver;
pub mod error;
pub mod filter;
pub mod listing;
pub mod paginate;
pub mod sequence;
pub mod session;

pub use aggregate::{ResultKind, ResultSet, SearchResult, compose};
pub use debounce::Debouncer;
pub use error::SearchError;
pub use filter::{FilterProfile, Filterable, SelectionFilterExt, StatusMatch};
pub use listing::{GroupList, ListSession, TripList};
pub use paginate::Paginator;
pub use sequence::{RequestSequencer, ResponseOrdering, Ticket};
pub use session::SearchSession;
