//! Service layer: the schedule computations the presentation layer calls.
//!
//! Services are pure, synchronous functions over read-only repository
//! queries. Each call produces a fresh value ([`ScheduleRange`],
//! [`ScheduleTable`], a [`Block`] match); nothing here holds shared
//! mutable state, so services are safe to call from concurrent request
//! handlers.
//!
//! [`ScheduleRange`]: range::ScheduleRange
//! [`ScheduleTable`]: table::ScheduleTable
//! [`Block`]: crate::models::Block

pub mod blocks;
pub mod calendar;
pub mod filler;
pub mod metadata;
pub mod range;
pub mod table;

pub use blocks::block_of;
pub use calendar::{term_before, term_of, TermStatus};
pub use filler::{fill, filler_timeslot, FillerExtent};
pub use range::{RangeQuery, ScheduleRange};
pub use table::{ScheduleTable, TabulationError};

use chrono::{DateTime, Utc};

use crate::db::RepositoryError;

/// Error type for schedule computations.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Filler synthesis was asked to cover an instant that no known term
    /// contains or precedes; fabricating a term-less filler would corrupt
    /// season inheritance downstream.
    #[error("no term contains or precedes {0}; cannot synthesize a filler timeslot")]
    OutsideKnownTerms(DateTime<Utc>),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for schedule computations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
