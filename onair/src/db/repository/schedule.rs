//! Timeslot interval queries and the filler sentinel show.

use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::models::{Show, Timeslot};

/// Repository trait for schedule timeslot queries.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so services can be called from
/// concurrent request handlers.
pub trait TimeslotRepository: Send + Sync {
    /// Fetch every stored timeslot intersecting the half-open interval
    /// `[start, end)`.
    ///
    /// A timeslot intersects when its end time is after `start` and its
    /// start time is before `end`; timeslots that merely touch a boundary
    /// do not intersect. Result order is unspecified - callers sort.
    ///
    /// # Arguments
    /// * `start` - Start of the interval
    /// * `end` - End of the interval
    ///
    /// # Returns
    /// * `Ok(Vec<Timeslot>)` - All intersecting timeslots, unordered
    /// * `Err(RepositoryError)` - If the operation fails
    fn timeslots_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Timeslot>>;

    /// The fixed, well-known pseudo-show reserved for filler timeslots
    /// (sustainer/jukebox programming).
    ///
    /// # Returns
    /// * `Ok(Show)` - The sentinel show
    /// * `Err(RepositoryError::NotFound)` - If no sentinel is configured
    fn filler_show(&self) -> RepositoryResult<Show>;
}
