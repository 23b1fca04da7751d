//! Timeslot range queries.
//!
//! A contiguous, linear chunk of programming is extracted from the
//! schedule as a [`ScheduleRange`]: the timeslots intersecting a
//! requested interval, ordered, optionally gap-filled, and wrapped
//! together with the parameters that produced them so downstream
//! consumers can validate the shape of what they were handed.

use chrono::{DateTime, TimeDelta, Utc};

use super::filler;
use super::ScheduleResult;
use crate::db::{TermRepository, TimeslotRepository};
use crate::models::Timeslot;

/// Boundary-inclusion policy for a range query.
///
/// The three `exclude_*` flags each discard one category of timeslot
/// straddling the range boundaries; timeslots lying fully inside the
/// range are always returned. `with_filler` pads any remaining gaps with
/// sentinel-show filler entries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    /// Discard timeslots that start before the range but end within it.
    pub exclude_before_start: bool,
    /// Discard timeslots that start within the range but end after it.
    pub exclude_after_end: bool,
    /// Discard timeslots that start before and end after the range,
    /// subsuming it entirely.
    pub exclude_subsuming: bool,
    /// Fill gaps with filler timeslots.
    pub with_filler: bool,
}

impl Default for RangeQuery {
    fn default() -> Self {
        Self {
            exclude_before_start: false,
            exclude_after_end: false,
            exclude_subsuming: false,
            with_filler: true,
        }
    }
}

/// The result of a timeslots-in-range query.
///
/// A thin wrapper around the ordered timeslot list that includes the
/// start of the range, the end of the range, and which parameters were
/// used in the making of the range. The wrapped list is reachable only
/// through the explicit accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRange {
    data: Vec<Timeslot>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub exclude_before_start: bool,
    pub exclude_after_end: bool,
    pub exclude_subsuming: bool,
    pub with_filler: bool,
}

impl ScheduleRange {
    /// The width of the queried interval.
    pub fn timespan(&self) -> TimeDelta {
        self.end - self.start
    }

    /// The ordered timeslots this range holds.
    pub fn timeslots(&self) -> &[Timeslot] {
        &self.data
    }

    /// Consumes the range, yielding its ordered timeslots.
    pub fn into_timeslots(self) -> Vec<Timeslot> {
        self.data
    }

    /// Returns all the timeslots within a range defined by two instants.
    ///
    /// The repository supplies every timeslot intersecting `[start, end)`;
    /// what remains after the query's boundary policy falls into four
    /// categories by how it straddles the boundaries:
    ///
    /// 1. starts and ends inside the range - always returned
    /// 2. starts before but ends inside - dropped when
    ///    `exclude_before_start`
    /// 3. starts inside but ends after - dropped when `exclude_after_end`
    /// 4. starts before and ends after, subsuming the range - dropped
    ///    when `exclude_subsuming`
    ///
    /// The survivors are sorted ascending by start time and, when
    /// `with_filler` is set, gap-filled over the whole interval.
    pub fn between<R>(
        repo: &R,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        query: RangeQuery,
    ) -> ScheduleResult<Self>
    where
        R: TermRepository + TimeslotRepository + ?Sized,
    {
        let mut timeslots = repo.timeslots_overlapping(start, end)?;

        timeslots.retain(|slot| {
            let starts_before = slot.start_time < start;
            let ends_after = slot.end_time() > end;
            if query.exclude_before_start && starts_before && !ends_after {
                return false;
            }
            if query.exclude_after_end && !starts_before && ends_after {
                return false;
            }
            if query.exclude_subsuming && starts_before && ends_after {
                return false;
            }
            true
        });

        timeslots.sort_by_key(|slot| slot.start_time);

        if query.with_filler {
            timeslots = filler::fill(repo, timeslots, start, end)?;
        }

        Ok(Self {
            data: timeslots,
            start,
            end,
            exclude_before_start: query.exclude_before_start,
            exclude_after_end: query.exclude_after_end,
            exclude_subsuming: query.exclude_subsuming,
            with_filler: query.with_filler,
        })
    }

    /// Lists all schedule timeslots occurring within the given duration
    /// of the given moment in time.
    pub fn within<R>(
        repo: &R,
        instant: DateTime<Utc>,
        offset: TimeDelta,
        query: RangeQuery,
    ) -> ScheduleResult<Self>
    where
        R: TermRepository + TimeslotRepository + ?Sized,
    {
        Self::between(repo, instant, instant + offset, query)
    }

    /// Lists all schedule timeslots occurring between the given moment
    /// and the moment exactly one day after it.
    pub fn day<R>(repo: &R, instant: DateTime<Utc>, query: RangeQuery) -> ScheduleResult<Self>
    where
        R: TermRepository + TimeslotRepository + ?Sized,
    {
        Self::within(repo, instant, TimeDelta::days(1), query)
    }

    /// Lists all schedule timeslots occurring between the given moment
    /// and the moment exactly one week after it, as a single range.
    pub fn week<R>(repo: &R, instant: DateTime<Utc>, query: RangeQuery) -> ScheduleResult<Self>
    where
        R: TermRepository + TimeslotRepository + ?Sized,
    {
        Self::within(repo, instant, TimeDelta::weeks(1), query)
    }

    /// Lists one week of schedule timeslots as seven consecutive one-day
    /// ranges, the shape [`ScheduleTable::tabulate`] consumes.
    ///
    /// [`ScheduleTable::tabulate`]: super::table::ScheduleTable::tabulate
    pub fn week_split<R>(
        repo: &R,
        instant: DateTime<Utc>,
        query: RangeQuery,
    ) -> ScheduleResult<Vec<Self>>
    where
        R: TermRepository + TimeslotRepository + ?Sized,
    {
        (0..7)
            .map(|day| Self::day(repo, instant + TimeDelta::days(day), query))
            .collect()
    }
}
