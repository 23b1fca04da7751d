//! Filler timeslot synthesis.
//!
//! Filler slots are fake timeslots, tied to a fake season (which is
//! assigned to a real sentinel show), used to pad out gaps in timeslot
//! ranges so that a requested interval is always fully covered. They
//! correspond to the station's sustainer/jukebox output and exist only in
//! memory; nothing here is ever persisted.

use chrono::{DateTime, TimeDelta, Utc};

use super::calendar::{term_before, term_of};
use super::{ScheduleError, ScheduleResult};
use crate::db::{TermRepository, TimeslotRepository};
use crate::models::{Season, Timeslot};

/// How far a filler timeslot extends from its start instant.
///
/// A filler is given exactly one of an end instant or a duration; the
/// two variants make any other combination unrepresentable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FillerExtent {
    /// The filler ends at this instant.
    Until(DateTime<Utc>),
    /// The filler lasts this long.
    Lasting(TimeDelta),
}

/// Synthesizes the pseudo-season a filler timeslot hangs from.
///
/// The season is assigned to the term containing the filler's start, or
/// failing that the term preceding it, so that season inheritance keeps
/// working for filler entries. With no term to hang it from, filler
/// cannot be built at all.
fn filler_season<R>(repo: &R, start_time: DateTime<Utc>) -> ScheduleResult<Season>
where
    R: TermRepository + TimeslotRepository + ?Sized,
{
    let term = match term_of(repo, start_time)? {
        Some(term) => term,
        None => term_before(repo, start_time)?
            .ok_or(ScheduleError::OutsideKnownTerms(start_time))?,
    };
    let show = repo.filler_show()?;
    Ok(Season {
        id: None,
        show_id: show.id,
        term_id: term.id,
        submitted: term.start,
    })
}

/// Creates a new in-memory timeslot bound to the sentinel filler show.
pub fn filler_timeslot<R>(
    repo: &R,
    start_time: DateTime<Utc>,
    extent: FillerExtent,
) -> ScheduleResult<Timeslot>
where
    R: TermRepository + TimeslotRepository + ?Sized,
{
    let duration = match extent {
        FillerExtent::Until(end_time) => end_time - start_time,
        FillerExtent::Lasting(duration) => duration,
    };
    Ok(Timeslot {
        id: None,
        season: filler_season(repo, start_time)?,
        start_time,
        duration,
    })
}

/// Fills any gaps in the given timeslot list with filler slots, such that
/// the list is fully populated from `start` to `end`.
///
/// The input must be sorted ascending by start time. Gap detection runs
/// against the furthest end instant seen so far, so a slot nested inside
/// a longer one never causes a filler to be laid over the longer slot.
/// Zero-length gaps produce nothing.
pub fn fill<R>(
    repo: &R,
    timeslots: Vec<Timeslot>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ScheduleResult<Vec<Timeslot>>
where
    R: TermRepository + TimeslotRepository + ?Sized,
{
    if timeslots.is_empty() {
        return Ok(vec![filler_timeslot(repo, start, FillerExtent::Until(end))?]);
    }

    let mut filled = Vec::with_capacity(timeslots.len() + 2);
    // The furthest instant covered so far; anything before it needs no
    // filler even if the next slot starts earlier.
    let mut frontier = start;
    let mut inserted = 0usize;

    for slot in timeslots {
        if frontier < slot.start_time {
            filled.push(filler_timeslot(
                repo,
                frontier,
                FillerExtent::Until(slot.start_time),
            )?);
            inserted += 1;
        }
        frontier = frontier.max(slot.end_time());
        filled.push(slot);
    }
    if frontier < end {
        filled.push(filler_timeslot(repo, frontier, FillerExtent::Until(end))?);
        inserted += 1;
    }

    if inserted > 0 {
        log::debug!("inserted {} filler timeslot(s) into [{}, {})", inserted, start, end);
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use crate::models::{SeasonId, ShowType, ShowTypeId};
    use chrono::TimeZone;

    fn seeded_repo() -> (LocalRepository, DateTime<Utc>, SeasonId) {
        let repo = LocalRepository::new();
        let term_start = Utc.with_ymd_and_hms(2012, 10, 1, 0, 0, 0).unwrap();
        let term = repo.store_term("Autumn", term_start, term_start + TimeDelta::weeks(10));
        let sustainer = repo.store_show(
            "Jukebox",
            ShowType {
                id: ShowTypeId(1),
                name: "Sustainer".to_string(),
                public: true,
                has_showdb_entry: false,
            },
        );
        repo.set_filler_show(sustainer);
        let show = repo.store_show(
            "Breakfast",
            ShowType {
                id: ShowTypeId(2),
                name: "Show".to_string(),
                public: true,
                has_showdb_entry: true,
            },
        );
        let season = repo.store_season(show, term, term_start);
        (repo, term_start, season)
    }

    fn real_slot(
        repo: &LocalRepository,
        season: SeasonId,
        start: DateTime<Utc>,
        hours: i64,
    ) -> Timeslot {
        let id = repo.store_timeslot(season, start, TimeDelta::hours(hours));
        repo.timeslots_overlapping(start, start + TimeDelta::hours(hours))
            .unwrap()
            .into_iter()
            .find(|s| s.id == Some(id))
            .unwrap()
    }

    #[test]
    fn empty_input_yields_one_filler_spanning_the_interval() {
        let (repo, t0, _) = seeded_repo();
        let filled = fill(&repo, vec![], t0, t0 + TimeDelta::hours(2)).unwrap();
        assert_eq!(filled.len(), 1);
        assert!(filled[0].is_filler());
        assert_eq!(filled[0].start_time, t0);
        assert_eq!(filled[0].duration, TimeDelta::hours(2));
    }

    #[test]
    fn edges_and_interior_gaps_are_filled() {
        let (repo, t0, season) = seeded_repo();
        let a = real_slot(&repo, season, t0 + TimeDelta::hours(2), 1);
        let b = real_slot(&repo, season, t0 + TimeDelta::hours(5), 1);

        let filled = fill(&repo, vec![a, b], t0, t0 + TimeDelta::hours(8)).unwrap();
        let spans: Vec<(DateTime<Utc>, DateTime<Utc>, bool)> = filled
            .iter()
            .map(|s| (s.start_time, s.end_time(), s.is_filler()))
            .collect();
        assert_eq!(
            spans,
            vec![
                (t0, t0 + TimeDelta::hours(2), true),
                (t0 + TimeDelta::hours(2), t0 + TimeDelta::hours(3), false),
                (t0 + TimeDelta::hours(3), t0 + TimeDelta::hours(5), true),
                (t0 + TimeDelta::hours(5), t0 + TimeDelta::hours(6), false),
                (t0 + TimeDelta::hours(6), t0 + TimeDelta::hours(8), true),
            ]
        );
    }

    #[test]
    fn touching_slots_get_no_filler_between_them() {
        let (repo, t0, season) = seeded_repo();
        let a = real_slot(&repo, season, t0, 2);
        let b = real_slot(&repo, season, t0 + TimeDelta::hours(2), 2);

        let filled = fill(&repo, vec![a, b], t0, t0 + TimeDelta::hours(4)).unwrap();
        assert_eq!(filled.len(), 2);
        assert!(filled.iter().all(|s| !s.is_filler()));
    }

    #[test]
    fn nested_slot_does_not_cause_overlapping_filler() {
        let (repo, t0, season) = seeded_repo();
        let long = real_slot(&repo, season, t0, 6);
        let nested = real_slot(&repo, season, t0 + TimeDelta::hours(1), 1);

        let filled = fill(&repo, vec![long, nested], t0, t0 + TimeDelta::hours(8)).unwrap();
        let fillers: Vec<&Timeslot> = filled.iter().filter(|s| s.is_filler()).collect();
        assert_eq!(fillers.len(), 1);
        assert_eq!(fillers[0].start_time, t0 + TimeDelta::hours(6));
        assert_eq!(fillers[0].end_time(), t0 + TimeDelta::hours(8));
    }

    #[test]
    fn filler_season_prefers_containing_term() {
        let (repo, t0, _) = seeded_repo();
        let slot = filler_timeslot(&repo, t0, FillerExtent::Lasting(TimeDelta::hours(1))).unwrap();
        assert!(slot.season.is_synthetic());
        assert_eq!(slot.season.submitted, t0);
        assert_eq!(slot.duration, TimeDelta::hours(1));
    }

    #[test]
    fn filler_in_a_holiday_hangs_from_the_preceding_term() {
        let (repo, t0, _) = seeded_repo();
        // Eleven weeks in: one week after Autumn ends.
        let holiday = t0 + TimeDelta::weeks(11);
        let slot = filler_timeslot(&repo, holiday, FillerExtent::Lasting(TimeDelta::hours(1)))
            .unwrap();
        assert_eq!(slot.season.submitted, t0);
    }

    #[test]
    fn filler_before_all_terms_is_an_error() {
        let (repo, t0, _) = seeded_repo();
        let before = t0 - TimeDelta::weeks(1);
        let result = filler_timeslot(&repo, before, FillerExtent::Until(t0));
        assert!(matches!(result, Err(ScheduleError::OutsideKnownTerms(_))));
    }

    #[test]
    fn zero_width_request_on_empty_input_yields_zero_duration_filler() {
        let (repo, t0, _) = seeded_repo();
        let filled = fill(&repo, vec![], t0, t0).unwrap();
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].duration, TimeDelta::zero());
    }
}
