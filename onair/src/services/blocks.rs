//! Block classification.
//!
//! Decides which programming block, if any, a show, season or timeslot
//! falls into. Rules are consulted in strict precedence order: direct
//! show-level rules first, then the association a season inherits from
//! its show, then day-relative time-range rules. Within a tier, the
//! matching rule whose block has the lowest priority number wins.

use chrono::TimeDelta;

use crate::db::{BlockRepository, RepositoryResult};
use crate::models::{Block, Season, ShowId, Timeslot};

/// Returns the block the given show is in, if any.
///
/// For seasons and timeslots, use [`season_block`] and [`block_of`]
/// instead so as to pull in their own matching rules.
pub fn show_block<R: BlockRepository + ?Sized>(
    repo: &R,
    show_id: ShowId,
) -> RepositoryResult<Option<Block>> {
    let mut rules = repo.show_block_rules(show_id)?;
    // Stable sort: among equal priorities the first-stored rule wins.
    rules.sort_by_key(|(_, block)| block.priority);
    Ok(rules.into_iter().next().map(|(_, block)| block))
}

/// Returns the block the given season is in, if any.
///
/// Seasons inherit their show's block match.
pub fn season_block<R: BlockRepository + ?Sized>(
    repo: &R,
    season: &Season,
) -> RepositoryResult<Option<Block>> {
    // TODO: direct season-level rules, once the rule tables grow a season
    // column; until then a season's block is exactly its show's.
    show_block(repo, season.show_id)
}

/// Returns the block the given timeslot is in, if any.
///
/// `None` means no rule matched at any tier; the caller may substitute an
/// application-defined default block if it needs one.
///
/// # Panics
/// Panics if the timeslot's midnight-relative interval is empty or
/// negative, which indicates a malformed slot.
pub fn block_of<R: BlockRepository + ?Sized>(
    repo: &R,
    timeslot: &Timeslot,
) -> RepositoryResult<Option<Block>> {
    // Season rules take precedence.
    if let Some(block) = season_block(repo, &timeslot.season)? {
        return Ok(Some(block));
    }

    // Get start as distance from midnight, and end as distance plus
    // duration.
    let midnight = timeslot
        .start_time
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc();
    let slot_start = timeslot.start_time - midnight;
    let slot_end = slot_start + timeslot.duration;
    assert!(slot_start < slot_end, "slot starts at or after its end");

    // Simple inequalities match the time ranges, with the caveat that the
    // slot must also be checked projected forward one day, so that ranges
    // starting the day before the show and ending on the day of the show
    // are considered correctly.
    let day = TimeDelta::days(1);
    let mut matches: Vec<(_, Block)> = repo
        .range_block_rules()?
        .into_iter()
        .filter(|(rule, _)| {
            rule.covers(slot_start, slot_end) || rule.covers(slot_start + day, slot_end + day)
        })
        .collect();
    matches.sort_by_key(|(_, block)| block.priority);

    if matches.is_empty() {
        log::debug!(
            "no block rule matched timeslot starting {}",
            timeslot.start_time
        );
    }
    Ok(matches.into_iter().next().map(|(_, block)| block))
}
