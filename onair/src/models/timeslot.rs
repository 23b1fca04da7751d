use chrono::{DateTime, TimeDelta, Utc};

use super::season::Season;

crate::define_id_type!(
    i64,
    /// Strongly-typed identifier for a schedule timeslot.
    TimeslotId
);

/// A slot in the station schedule allocated to a show.
///
/// Timeslots can overlap, because not all timeslots represent on-air
/// shows (the schedule system also books demos, in-studio recordings and
/// outside broadcasts). Because of this, a timeslot CANNOT safely be
/// uniquely identified by its show and time range - use the timeslot ID.
///
/// The embedded [`Season`] is a read-only projection of the ownership
/// chain (timeslot -> season -> show -> term). A timeslot with
/// `id == None` is a synthetic filler entry covering a schedule gap.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeslot {
    pub id: Option<TimeslotId>,
    pub season: Season,
    pub start_time: DateTime<Utc>,
    #[serde(with = "crate::models::time::serde_secs")]
    pub duration: TimeDelta,
}

impl Timeslot {
    /// Calculates the end time of this timeslot.
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + self.duration
    }

    /// Whether this timeslot is a synthetic filler entry.
    pub fn is_filler(&self) -> bool {
        self.id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SeasonId, ShowId, TermId};
    use chrono::TimeZone;

    #[test]
    fn end_time_is_start_plus_duration() {
        let start = Utc.with_ymd_and_hms(2012, 10, 1, 9, 0, 0).unwrap();
        let slot = Timeslot {
            id: Some(TimeslotId(1)),
            season: Season {
                id: Some(SeasonId(1)),
                show_id: ShowId(1),
                term_id: TermId(1),
                submitted: start,
            },
            start_time: start,
            duration: TimeDelta::hours(2),
        };
        assert_eq!(
            slot.end_time(),
            Utc.with_ymd_and_hms(2012, 10, 1, 11, 0, 0).unwrap()
        );
        assert!(!slot.is_filler());
    }
}
