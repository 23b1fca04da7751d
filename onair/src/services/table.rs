//! Weekly schedule tabulation.
//!
//! Converts seven one-day [`ScheduleRange`]s into a renderable grid: a
//! sequence of time-bounded rows, each with up to seven cells, where a
//! timeslot spanning several rows is represented once with a row-span
//! count rather than repeated (row compression).

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Timelike, Utc};

use super::range::ScheduleRange;
use crate::config::StationConfig;
use crate::models::Timeslot;

/// Error type for tabulation input-contract violations.
///
/// The tabulator only works over uniformly built day ranges; anything
/// else would silently drop or duplicate timeslots at day boundaries, so
/// each violation is reported immediately.
#[derive(Debug, thiserror::Error)]
pub enum TabulationError {
    #[error("a schedule week must contain exactly 7 day ranges, got {0}")]
    NotSevenDays(usize),

    #[error("day {0} was built without filler; every column must be gap-free")]
    MissingFiller(usize),

    #[error("day {0} spans {1} instead of exactly one day")]
    WrongTimespan(usize, TimeDelta),

    #[error("day {0} excludes timeslots overlapping its start")]
    ExcludesBeforeStart(usize),

    #[error("day {0} excludes timeslots overlapping its end")]
    ExcludesAfterEnd(usize),

    #[error("day {0} excludes timeslots subsuming it")]
    ExcludesSubsuming(usize),
}

/// An entry in a schedule table row.
///
/// Entries depict the part of a timeslot that airs inside the time
/// period of their parent row; `row_span` counts how many consecutive
/// rows the timeslot occupies in its column.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub timeslot: Timeslot,
    pub row_span: u32,
}

/// A row in a schedule table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub start_time: DateTime<Utc>,
    pub duration: TimeDelta,
    entries: Vec<Entry>,
    see_above: Vec<usize>,
}

impl Row {
    fn new(start_time: DateTime<Utc>, duration: TimeDelta) -> Self {
        Self {
            start_time,
            duration,
            entries: Vec::with_capacity(7),
            see_above: Vec::new(),
        }
    }

    fn add(&mut self, timeslot: Timeslot) {
        assert!(self.entries.len() < 7, "row already has seven columns");
        self.entries.push(Entry {
            timeslot,
            row_span: 1,
        });
    }

    /// The actual index of a given logical column in this row's entries.
    ///
    /// The two may differ because row compression removes entries that
    /// continue from an earlier row.
    fn real_column(&self, column: usize) -> usize {
        column - self.see_above.iter().filter(|&&c| c < column).count()
    }

    /// Gets the entry at the given logical column.
    ///
    /// Returns `None` when the column's timeslot continues from an
    /// earlier row and its cell lives there instead.
    pub fn get(&self, column: usize) -> Option<&Entry> {
        if self.see_above.contains(&column) {
            None
        } else {
            self.entries.get(self.real_column(column))
        }
    }

    fn inc_row_span(&mut self, column: usize) {
        let real = self.real_column(column);
        self.entries[real].row_span += 1;
    }

    /// Whether the given logical column is a continuation of an earlier
    /// row's cell.
    pub fn is_continuation(&self, column: usize) -> bool {
        self.see_above.contains(&column)
    }

    /// The visible entries of this row, in column order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// A weekly schedule in tabular form, ready to be rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleTable {
    rows: Vec<Row>,
}

impl ScheduleTable {
    fn new() -> Self {
        Self::default()
    }

    /// The rows of the table, earliest first.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Adds a new row, compressing it in the process.
    ///
    /// For each column whose new cell references the same timeslot as the
    /// nearest visible cell above it, the new cell is omitted, the column
    /// recorded as a continuation, and the earlier cell's row span
    /// incremented instead.
    fn add(&mut self, mut row: Row) {
        let mut compressed = Vec::new();
        for column in 0..row.entries.len() {
            let Some(above_idx) = self.rows.iter().rposition(|r| r.get(column).is_some())
            else {
                continue;
            };
            let above = self.rows[above_idx]
                .get(column)
                .expect("rposition found a visible entry");
            if above.timeslot == row.entries[column].timeslot {
                compressed.push(column);
                self.rows[above_idx].inc_row_span(column);
            }
        }
        for &column in compressed.iter().rev() {
            row.entries.remove(column);
        }
        row.see_above = compressed;
        self.rows.push(row);
    }

    /// Creates a schedule week table from seven uniformly built one-day
    /// ranges, as produced by [`ScheduleRange::week_split`] with the
    /// default query.
    ///
    /// Hour alignment follows the station configuration.
    pub fn tabulate(ranges: Vec<ScheduleRange>) -> Result<Self, TabulationError> {
        let align_to_hour = StationConfig::global().align_to_hour;
        Self::tabulate_with(ranges, align_to_hour)
    }

    /// As [`tabulate`](Self::tabulate), with an explicit hour-alignment
    /// policy.
    pub fn tabulate_with(
        ranges: Vec<ScheduleRange>,
        align_to_hour: bool,
    ) -> Result<Self, TabulationError> {
        if ranges.len() != 7 {
            return Err(TabulationError::NotSevenDays(ranges.len()));
        }
        for (day, range) in ranges.iter().enumerate() {
            if !range.with_filler {
                return Err(TabulationError::MissingFiller(day));
            }
            if range.timespan() != TimeDelta::days(1) {
                return Err(TabulationError::WrongTimespan(day, range.timespan()));
            }
            if range.exclude_before_start {
                return Err(TabulationError::ExcludesBeforeStart(day));
            }
            if range.exclude_after_end {
                return Err(TabulationError::ExcludesAfterEnd(day));
            }
            if range.exclude_subsuming {
                return Err(TabulationError::ExcludesSubsuming(day));
            }
        }

        let start = ranges[0].start;
        let days = ranges
            .into_iter()
            .map(|range| range.into_timeslots().into())
            .collect();
        Ok(Self::tabulate_day_lists(days, start, align_to_hour))
    }

    /// Creates a schedule week table from seven per-day timeslot lists.
    ///
    /// You should generally use [`tabulate`](Self::tabulate) instead of
    /// invoking this directly; it checks the input shape this function
    /// assumes.
    ///
    /// # Panics
    /// Panics if the lists are not exactly seven, if any list is empty,
    /// or if the lists are unevenly covered and a column runs dry before
    /// the week does - all signs of input not built by a uniform,
    /// filler-padded day query.
    pub fn tabulate_day_lists(
        mut days: Vec<VecDeque<Timeslot>>,
        start: DateTime<Utc>,
        align_to_hour: bool,
    ) -> Self {
        assert_eq!(days.len(), 7, "must be 7 days in the week list");
        assert!(
            days.iter().all(|day| !day.is_empty()),
            "all week lists must be populated"
        );

        let day_len = TimeDelta::days(1);
        let mut remaining: Vec<TimeDelta> = days
            .iter()
            .map(|day| day.front().expect("populated list").duration)
            .collect();
        let mut row_start = start;
        let mut table = ScheduleTable::new();

        while days.iter().any(|day| !day.is_empty()) {
            assert!(
                days.iter().all(|day| !day.is_empty()),
                "all columns must cover the same total span"
            );
            assert!(
                remaining.iter().all(|r| *r > TimeDelta::zero()),
                "no time remaining on an unpopped timeslot"
            );

            // If any column's current timeslot would run past the 24-hour
            // day boundary, cull its remaining duration to stop exactly
            // there and discard the rest of that column. Filler padding
            // guarantees each day is at least 24 hours long, so only the
            // final entry of a column can trip this.
            let elapsed = row_start - start;
            for day in 0..7 {
                if elapsed + remaining[day] > day_len {
                    remaining[day] = day_len - elapsed;
                    if days[day].len() > 1 {
                        log::debug!(
                            "column {} truncated at the day boundary, dropping {} entries",
                            day,
                            days[day].len() - 1
                        );
                    }
                    days[day].truncate(1);
                }
            }

            // The row ends where the shortest remaining timeslot does,
            // unless hour alignment splits it sooner.
            let shortest = *remaining.iter().min().expect("seven columns");
            let row_duration = if align_to_hour {
                let into_hour = TimeDelta::minutes(row_start.minute() as i64)
                    + TimeDelta::seconds(row_start.second() as i64)
                    + TimeDelta::nanoseconds(row_start.nanosecond() as i64);
                shortest.min(TimeDelta::hours(1) - into_hour)
            } else {
                shortest
            };

            let mut row = Row::new(row_start, row_duration);
            let mut ends_this_row = [false; 7];
            for day in 0..7 {
                let current = days[day].front().expect("populated list");
                ends_this_row[day] = remaining[day] == row_duration;
                assert!(
                    remaining[day] >= row_duration,
                    "row larger than the time remaining in a column"
                );
                assert!(
                    current.duration >= row_duration,
                    "row larger than a timeslot's duration"
                );
                row.add(current.clone());
            }
            table.add(row);

            // Pop spent timeslots off the day queues; deduct the row
            // duration from the unspent ones.
            for day in 0..7 {
                if ends_this_row[day] {
                    days[day].pop_front();
                    remaining[day] = match days[day].front() {
                        Some(next) => next.duration,
                        None => TimeDelta::zero(),
                    };
                } else {
                    remaining[day] -= row_duration;
                    assert!(
                        remaining[day] > TimeDelta::zero(),
                        "no time remaining on an unpopped timeslot"
                    );
                }
            }

            row_start += row_duration;
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use crate::models::{Season, SeasonId, ShowId, ShowType, ShowTypeId, TermId, TimeslotId};
    use crate::services::range::RangeQuery;
    use chrono::TimeZone;

    fn slot(id: i64, start: DateTime<Utc>, duration: TimeDelta) -> Timeslot {
        Timeslot {
            id: Some(TimeslotId(id)),
            season: Season {
                id: Some(SeasonId(1)),
                show_id: ShowId(1),
                term_id: TermId(1),
                submitted: start,
            },
            start_time: start,
            duration,
        }
    }

    fn week_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2012, 10, 1, 7, 0, 0).unwrap()
    }

    /// Monday covered by one full-day timeslot, the other six days by
    /// three equal slots each.
    fn uneven_week() -> Vec<VecDeque<Timeslot>> {
        let start = week_start();
        let mut days = Vec::new();
        days.push(VecDeque::from(vec![slot(100, start, TimeDelta::days(1))]));
        for day in 1..7 {
            let day_start = start + TimeDelta::days(day);
            days.push(VecDeque::from(
                (0..3)
                    .map(|i| {
                        slot(
                            day * 10 + i,
                            day_start + TimeDelta::hours(8 * i),
                            TimeDelta::hours(8),
                        )
                    })
                    .collect::<Vec<_>>(),
            ));
        }
        days
    }

    #[test]
    fn long_timeslot_is_compressed_into_one_spanning_cell() {
        let table = ScheduleTable::tabulate_day_lists(uneven_week(), week_start(), false);
        assert_eq!(table.rows().len(), 3);

        // Monday: one visible cell spanning all three rows, continuations
        // below it.
        let monday = table.rows()[0].get(0).unwrap();
        assert_eq!(monday.row_span, 3);
        assert!(table.rows()[1].get(0).is_none());
        assert!(table.rows()[1].is_continuation(0));
        assert!(table.rows()[2].get(0).is_none());

        // Every other column shows a fresh cell per row.
        for row in table.rows() {
            for column in 1..7 {
                assert_eq!(row.get(column).unwrap().row_span, 1);
            }
        }
    }

    #[test]
    fn rows_cover_the_day_without_gaps() {
        let table = ScheduleTable::tabulate_day_lists(uneven_week(), week_start(), false);
        let mut cursor = week_start();
        for row in table.rows() {
            assert_eq!(row.start_time, cursor);
            cursor += row.duration;
        }
        assert_eq!(cursor, week_start() + TimeDelta::days(1));
    }

    #[test]
    fn hour_alignment_splits_rows_at_hour_boundaries() {
        let start = Utc.with_ymd_and_hms(2012, 10, 1, 6, 30, 0).unwrap();
        let days: Vec<VecDeque<Timeslot>> = (0..7)
            .map(|day| {
                VecDeque::from(vec![slot(
                    day,
                    start + TimeDelta::days(day),
                    TimeDelta::days(1),
                )])
            })
            .collect();

        let table = ScheduleTable::tabulate_day_lists(days, start, true);
        // 06:30 to 07:00, then hourly to 06:00, then 06:00 to 06:30.
        assert_eq!(table.rows().len(), 25);
        assert_eq!(table.rows()[0].duration, TimeDelta::minutes(30));
        assert_eq!(table.rows()[1].duration, TimeDelta::hours(1));
        assert_eq!(table.rows()[24].duration, TimeDelta::minutes(30));
        assert_eq!(table.rows()[0].get(3).unwrap().row_span, 25);
    }

    #[test]
    fn overlong_final_entry_is_clamped_to_the_day_boundary() {
        let start = week_start();
        let mut days = uneven_week();
        // Filler running past the day boundary, as a day query that
        // caught a marathon show would produce.
        days[3] = VecDeque::from(vec![slot(
            999,
            start + TimeDelta::days(3),
            TimeDelta::hours(30),
        )]);

        let table = ScheduleTable::tabulate_day_lists(days, start, false);
        let total: TimeDelta = table
            .rows()
            .iter()
            .fold(TimeDelta::zero(), |acc, row| acc + row.duration);
        assert_eq!(total, TimeDelta::days(1));
    }

    fn seeded_week_ranges(query: RangeQuery) -> Vec<ScheduleRange> {
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
        repo.store_timeslot(season, week_start() + TimeDelta::hours(2), TimeDelta::hours(1));

        ScheduleRange::week_split(&repo, week_start(), query).unwrap()
    }

    #[test]
    fn tabulate_accepts_a_uniform_week() {
        let table = ScheduleTable::tabulate(seeded_week_ranges(RangeQuery::default())).unwrap();
        assert!(!table.rows().is_empty());
    }

    #[test]
    fn tabulate_rejects_short_weeks() {
        let mut ranges = seeded_week_ranges(RangeQuery::default());
        ranges.pop();
        assert!(matches!(
            ScheduleTable::tabulate(ranges),
            Err(TabulationError::NotSevenDays(6))
        ));
    }

    #[test]
    fn tabulate_rejects_unfilled_columns() {
        let ranges = seeded_week_ranges(RangeQuery {
            with_filler: false,
            ..RangeQuery::default()
        });
        assert!(matches!(
            ScheduleTable::tabulate(ranges),
            Err(TabulationError::MissingFiller(0))
        ));
    }

    #[test]
    fn tabulate_rejects_exclusion_flags() {
        let ranges = seeded_week_ranges(RangeQuery {
            exclude_after_end: true,
            ..RangeQuery::default()
        });
        assert!(matches!(
            ScheduleTable::tabulate(ranges),
            Err(TabulationError::ExcludesAfterEnd(0))
        ));
    }
}
