//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMap and Vec structures, providing fast, deterministic,
//! and isolated execution.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, TimeDelta, Utc};

use crate::db::repository::*;
use crate::models::*;

/// In-memory local repository.
///
/// This implementation stores all data in memory using HashMaps and Vecs,
/// making it ideal for unit tests and local development that need
/// isolation and speed.
///
/// # Example
/// ```
/// use onair::db::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.timeslot_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

/// A stored season row; the public [`Season`] value is assembled on read.
#[derive(Debug, Clone)]
struct SeasonRow {
    show_id: ShowId,
    term_id: TermId,
    submitted: DateTime<Utc>,
}

/// A stored timeslot row; the public [`Timeslot`] value embeds its season
/// and is assembled on read.
#[derive(Debug, Clone)]
struct TimeslotRow {
    season_id: SeasonId,
    start_time: DateTime<Utc>,
    duration: TimeDelta,
}

#[derive(Default)]
struct LocalData {
    terms: Vec<Term>,
    shows: HashMap<ShowId, Show>,
    seasons: HashMap<SeasonId, SeasonRow>,
    timeslots: HashMap<TimeslotId, TimeslotRow>,
    blocks: HashMap<BlockId, Block>,
    show_rules: Vec<BlockShowRule>,
    range_rules: Vec<BlockRangeRule>,
    metadata: HashMap<(MetadataSubject, String), String>,

    filler_show_id: Option<ShowId>,

    // ID counters
    next_term_id: i64,
    next_show_id: i64,
    next_season_id: i64,
    next_timeslot_id: i64,
    next_block_id: i64,
    next_rule_id: i64,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term to the repository, assigning it an ID.
    pub fn store_term(
        &self,
        name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TermId {
        let mut data = self.data.write().unwrap();
        data.next_term_id += 1;
        let id = TermId(data.next_term_id);
        data.terms.push(Term {
            id,
            name: name.to_string(),
            start,
            end,
        });
        id
    }

    /// Add a show to the repository, assigning it an ID.
    pub fn store_show(&self, title: &str, show_type: ShowType) -> ShowId {
        let mut data = self.data.write().unwrap();
        data.next_show_id += 1;
        let id = ShowId(data.next_show_id);
        data.shows.insert(
            id,
            Show {
                id,
                title: title.to_string(),
                show_type,
            },
        );
        id
    }

    /// Add a season to the repository, assigning it an ID.
    pub fn store_season(
        &self,
        show_id: ShowId,
        term_id: TermId,
        submitted: DateTime<Utc>,
    ) -> SeasonId {
        let mut data = self.data.write().unwrap();
        data.next_season_id += 1;
        let id = SeasonId(data.next_season_id);
        data.seasons.insert(
            id,
            SeasonRow {
                show_id,
                term_id,
                submitted,
            },
        );
        id
    }

    /// Add a timeslot to the repository, assigning it an ID.
    pub fn store_timeslot(
        &self,
        season_id: SeasonId,
        start_time: DateTime<Utc>,
        duration: TimeDelta,
    ) -> TimeslotId {
        let mut data = self.data.write().unwrap();
        data.next_timeslot_id += 1;
        let id = TimeslotId(data.next_timeslot_id);
        data.timeslots.insert(
            id,
            TimeslotRow {
                season_id,
                start_time,
                duration,
            },
        );
        id
    }

    /// Add a block to the repository, assigning it an ID.
    pub fn store_block(
        &self,
        name: &str,
        tag: &str,
        priority: i32,
        is_listable: bool,
    ) -> BlockId {
        let mut data = self.data.write().unwrap();
        data.next_block_id += 1;
        let id = BlockId(data.next_block_id);
        data.blocks.insert(
            id,
            Block {
                id,
                name: name.to_string(),
                tag: tag.to_string(),
                priority,
                is_listable,
            },
        );
        id
    }

    /// Add a show-level block rule, assigning it an ID.
    pub fn store_show_rule(&self, block_id: BlockId, show_id: ShowId) -> RuleId {
        let mut data = self.data.write().unwrap();
        data.next_rule_id += 1;
        let id = RuleId(data.next_rule_id);
        data.show_rules.push(BlockShowRule {
            id,
            block_id,
            show_id,
        });
        id
    }

    /// Add a time-range block rule, assigning it an ID.
    pub fn store_range_rule(
        &self,
        block_id: BlockId,
        start_offset: TimeDelta,
        end_offset: TimeDelta,
    ) -> RuleId {
        let mut data = self.data.write().unwrap();
        data.next_rule_id += 1;
        let id = RuleId(data.next_rule_id);
        data.range_rules.push(BlockRangeRule {
            id,
            block_id,
            start_offset,
            end_offset,
        });
        id
    }

    /// Designate the sentinel show used for filler timeslots.
    pub fn set_filler_show(&self, show_id: ShowId) {
        self.data.write().unwrap().filler_show_id = Some(show_id);
    }

    /// Attach a metadata value to a subject, replacing any existing one.
    pub fn set_metadatum(&self, subject: MetadataSubject, key: &str, value: &str) {
        self.data
            .write()
            .unwrap()
            .metadata
            .insert((subject, key.to_string()), value.to_string());
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData::default();
    }

    /// Get the number of timeslots stored.
    pub fn timeslot_count(&self) -> usize {
        self.data.read().unwrap().timeslots.len()
    }

    /// Get the number of terms stored.
    pub fn term_count(&self) -> usize {
        self.data.read().unwrap().terms.len()
    }

    fn assemble_season(data: &LocalData, id: SeasonId) -> RepositoryResult<Season> {
        let row = data.seasons.get(&id).ok_or_else(|| {
            RepositoryError::InternalError(format!("dangling season reference: {}", id))
        })?;
        Ok(Season {
            id: Some(id),
            show_id: row.show_id,
            term_id: row.term_id,
            submitted: row.submitted,
        })
    }

    fn assemble_timeslot(
        data: &LocalData,
        id: TimeslotId,
        row: &TimeslotRow,
    ) -> RepositoryResult<Timeslot> {
        Ok(Timeslot {
            id: Some(id),
            season: Self::assemble_season(data, row.season_id)?,
            start_time: row.start_time,
            duration: row.duration,
        })
    }
}

impl TermRepository for LocalRepository {
    fn term_containing(&self, instant: DateTime<Utc>) -> RepositoryResult<Option<Term>> {
        let data = self.data.read().unwrap();
        Ok(data
            .terms
            .iter()
            .filter(|t| t.contains(instant))
            .max_by_key(|t| t.start)
            .cloned())
    }

    fn terms_ending_at_or_before(
        &self,
        instant: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Term>> {
        let data = self.data.read().unwrap();
        let mut terms: Vec<Term> = data
            .terms
            .iter()
            .filter(|t| t.end <= instant)
            .cloned()
            .collect();
        terms.sort_by_key(|t| t.end);
        Ok(terms)
    }
}

impl TimeslotRepository for LocalRepository {
    fn timeslots_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Timeslot>> {
        let data = self.data.read().unwrap();
        let mut slots = Vec::new();
        for (id, row) in &data.timeslots {
            let slot_end = row.start_time + row.duration;
            if row.start_time < end && slot_end > start {
                slots.push(Self::assemble_timeslot(&data, *id, row)?);
            }
        }
        Ok(slots)
    }

    fn filler_show(&self) -> RepositoryResult<Show> {
        let data = self.data.read().unwrap();
        let id = data
            .filler_show_id
            .ok_or_else(|| RepositoryError::NotFound("no filler show designated".into()))?;
        data.shows
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("filler show {}", id)))
    }
}

impl BlockRepository for LocalRepository {
    fn show_block_rules(
        &self,
        show_id: ShowId,
    ) -> RepositoryResult<Vec<(BlockShowRule, Block)>> {
        let data = self.data.read().unwrap();
        data.show_rules
            .iter()
            .filter(|r| r.show_id == show_id)
            .map(|r| {
                let block = data.blocks.get(&r.block_id).cloned().ok_or_else(|| {
                    RepositoryError::InternalError(format!(
                        "dangling block reference: {}",
                        r.block_id
                    ))
                })?;
                Ok((r.clone(), block))
            })
            .collect()
    }

    fn range_block_rules(&self) -> RepositoryResult<Vec<(BlockRangeRule, Block)>> {
        let data = self.data.read().unwrap();
        data.range_rules
            .iter()
            .map(|r| {
                let block = data.blocks.get(&r.block_id).cloned().ok_or_else(|| {
                    RepositoryError::InternalError(format!(
                        "dangling block reference: {}",
                        r.block_id
                    ))
                })?;
                Ok((r.clone(), block))
            })
            .collect()
    }
}

impl MetadataRepository for LocalRepository {
    fn metadatum(
        &self,
        subject: MetadataSubject,
        key: &str,
    ) -> RepositoryResult<Option<String>> {
        let data = self.data.read().unwrap();
        Ok(data.metadata.get(&(subject, key.to_string())).cloned())
    }

    fn metadata_parent(
        &self,
        subject: MetadataSubject,
    ) -> RepositoryResult<Option<MetadataSubject>> {
        let data = self.data.read().unwrap();
        match subject {
            MetadataSubject::Timeslot(id) => {
                let row = data.timeslots.get(&id).ok_or_else(|| {
                    RepositoryError::NotFound(format!("timeslot {}", id))
                })?;
                Ok(Some(MetadataSubject::Season(row.season_id)))
            }
            MetadataSubject::Season(id) => {
                let row = data
                    .seasons
                    .get(&id)
                    .ok_or_else(|| RepositoryError::NotFound(format!("season {}", id)))?;
                Ok(Some(MetadataSubject::Show(row.show_id)))
            }
            MetadataSubject::Show(_) | MetadataSubject::Website => Ok(None),
        }
    }
}
