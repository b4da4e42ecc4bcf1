//! Ordering of overlapping search responses
//!
//! Every fetch is issued a [`Ticket`]. When responses arrive out of order the
//! [`ResponseOrdering`] decides whether a late, older response still replaces
//! what is on screen.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Policy for responses that resolve out of issue order
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Whatever resolves last is shown, even if it was issued first
    #[default]
    LastResponse,
    /// A response older than the one already shown is dropped
    LastRequest,
}

/// Sequence number of an issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Hands out tickets and decides which responses to apply
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    ordering: ResponseOrdering,
    issued: u64,
    applied: Option<Ticket>,
}

impl RequestSequencer {
    #[must_use]
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            ordering,
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    /// Issue the next ticket
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Most recently issued ticket
    #[must_use]
    pub fn latest(&self) -> Option<Ticket> {
        (self.issued > 0).then_some(Ticket(self.issued))
    }

    /// Record a resolved response; `false` means it must be discarded
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        match self.ordering {
            ResponseOrdering::LastResponse => {
                // A late older response replaces the results but does not reopen the wait
                self.applied = self.applied.max(Some(ticket));
                true
            }
            ResponseOrdering::LastRequest => {
                if self.applied.is_some_and(|applied| ticket < applied) {
                    debug!(ticket = ticket.get(), "dropping stale search response");
                    return false;
                }
                self.applied = Some(ticket);
                true
            }
        }
    }

    /// Whether tickets were issued that have not been superseded by an applied one
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.latest() > self.applied
    }
}
