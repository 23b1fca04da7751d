//! JSON fixture loading.
//!
//! A fixture document describes terms, shows, seasons, timeslots, blocks
//! and matching rules in one JSON object, using its own record IDs for
//! cross-references. Loading re-assigns repository IDs and rewires the
//! references, so fixtures compose with data already in the repository.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::db::LocalRepository;
use crate::models::{MetadataSubject, SeasonId, ShowId, ShowType, ShowTypeId, TermId};

/// Raw JSON structure for a university term.
#[derive(Debug, Deserialize)]
struct RawTerm {
    id: i64,
    name: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Raw JSON structure for a show type.
#[derive(Debug, Deserialize)]
struct RawShowType {
    id: i64,
    name: String,
    #[serde(default = "default_true")]
    public: bool,
    #[serde(default)]
    has_showdb_entry: bool,
}

/// Raw JSON structure for a show.
#[derive(Debug, Deserialize)]
struct RawShow {
    id: i64,
    title: String,
    show_type: i64,
}

/// Raw JSON structure for a season.
#[derive(Debug, Deserialize)]
struct RawSeason {
    id: i64,
    show: i64,
    term: i64,
    /// Defaults to the owning term's start.
    submitted: Option<DateTime<Utc>>,
}

/// Raw JSON structure for a timeslot.
#[derive(Debug, Deserialize)]
struct RawTimeslot {
    id: i64,
    season: i64,
    start_time: DateTime<Utc>,
    duration_secs: i64,
}

/// Raw JSON structure for a block.
#[derive(Debug, Deserialize)]
struct RawBlock {
    id: i64,
    name: String,
    tag: String,
    priority: i32,
    #[serde(default)]
    is_listable: bool,
}

/// Raw JSON structure for a show-level block rule.
#[derive(Debug, Deserialize)]
struct RawShowRule {
    block: i64,
    show: i64,
}

/// Raw JSON structure for a time-range block rule.
#[derive(Debug, Deserialize)]
struct RawRangeRule {
    block: i64,
    start_offset_secs: i64,
    end_offset_secs: i64,
}

/// Raw JSON structure for a metadata subject reference.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawSubject {
    Show { id: i64 },
    Season { id: i64 },
    Timeslot { id: i64 },
    Website,
}

/// Raw JSON structure for one metadata value.
#[derive(Debug, Deserialize)]
struct RawMetadatum {
    subject: RawSubject,
    key: String,
    value: String,
}

/// Raw JSON structure for a whole fixture document.
#[derive(Debug, Deserialize)]
struct RawFixture {
    #[serde(default)]
    terms: Vec<RawTerm>,
    #[serde(default)]
    show_types: Vec<RawShowType>,
    #[serde(default)]
    shows: Vec<RawShow>,
    #[serde(default)]
    seasons: Vec<RawSeason>,
    #[serde(default)]
    timeslots: Vec<RawTimeslot>,
    #[serde(default)]
    blocks: Vec<RawBlock>,
    #[serde(default)]
    show_rules: Vec<RawShowRule>,
    #[serde(default)]
    range_rules: Vec<RawRangeRule>,
    /// Fixture ID of the show to designate as the filler sentinel.
    filler_show: Option<i64>,
    #[serde(default)]
    metadata: Vec<RawMetadatum>,
}

fn default_true() -> bool {
    true
}

/// Counts of what a fixture load stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureSummary {
    pub terms: usize,
    pub shows: usize,
    pub seasons: usize,
    pub timeslots: usize,
    pub blocks: usize,
    pub rules: usize,
}

/// Load a JSON fixture file into the repository.
pub fn load_fixture(path: &Path, repo: &LocalRepository) -> Result<FixtureSummary> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    load_fixture_str(&contents, repo)
        .with_context(|| format!("failed to load fixture {}", path.display()))
}

/// Load a JSON fixture document into the repository.
pub fn load_fixture_str(json: &str, repo: &LocalRepository) -> Result<FixtureSummary> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let fixture: RawFixture = serde_path_to_error::deserialize(&mut deserializer)
        .context("failed to parse fixture JSON")?;

    let mut term_ids: HashMap<i64, TermId> = HashMap::new();
    let mut term_starts: HashMap<TermId, DateTime<Utc>> = HashMap::new();
    for term in &fixture.terms {
        let id = repo.store_term(&term.name, term.start, term.end);
        term_ids.insert(term.id, id);
        term_starts.insert(id, term.start);
    }

    let mut show_types: HashMap<i64, ShowType> = HashMap::new();
    for (index, raw) in fixture.show_types.iter().enumerate() {
        show_types.insert(
            raw.id,
            ShowType {
                id: ShowTypeId(index as i64 + 1),
                name: raw.name.clone(),
                public: raw.public,
                has_showdb_entry: raw.has_showdb_entry,
            },
        );
    }

    let mut show_ids: HashMap<i64, ShowId> = HashMap::new();
    for show in &fixture.shows {
        let show_type = show_types
            .get(&show.show_type)
            .with_context(|| format!("show {} references unknown show type {}", show.id, show.show_type))?
            .clone();
        show_ids.insert(show.id, repo.store_show(&show.title, show_type));
    }

    let mut season_ids: HashMap<i64, SeasonId> = HashMap::new();
    for season in &fixture.seasons {
        let show = *show_ids
            .get(&season.show)
            .with_context(|| format!("season {} references unknown show {}", season.id, season.show))?;
        let term = *term_ids
            .get(&season.term)
            .with_context(|| format!("season {} references unknown term {}", season.id, season.term))?;
        let submitted = season.submitted.unwrap_or(term_starts[&term]);
        season_ids.insert(season.id, repo.store_season(show, term, submitted));
    }

    let mut timeslot_ids = HashMap::new();
    for slot in &fixture.timeslots {
        let season = *season_ids
            .get(&slot.season)
            .with_context(|| format!("timeslot {} references unknown season {}", slot.id, slot.season))?;
        if slot.duration_secs < 0 {
            bail!("timeslot {} has negative duration", slot.id);
        }
        let id = repo.store_timeslot(season, slot.start_time, TimeDelta::seconds(slot.duration_secs));
        timeslot_ids.insert(slot.id, id);
    }

    let mut block_ids = HashMap::new();
    for block in &fixture.blocks {
        block_ids.insert(
            block.id,
            repo.store_block(&block.name, &block.tag, block.priority, block.is_listable),
        );
    }

    for rule in &fixture.show_rules {
        let block = *block_ids
            .get(&rule.block)
            .with_context(|| format!("show rule references unknown block {}", rule.block))?;
        let show = *show_ids
            .get(&rule.show)
            .with_context(|| format!("show rule references unknown show {}", rule.show))?;
        repo.store_show_rule(block, show);
    }
    for rule in &fixture.range_rules {
        let block = *block_ids
            .get(&rule.block)
            .with_context(|| format!("range rule references unknown block {}", rule.block))?;
        repo.store_range_rule(
            block,
            TimeDelta::seconds(rule.start_offset_secs),
            TimeDelta::seconds(rule.end_offset_secs),
        );
    }

    if let Some(filler) = fixture.filler_show {
        let show = *show_ids
            .get(&filler)
            .with_context(|| format!("filler_show references unknown show {}", filler))?;
        repo.set_filler_show(show);
    }

    for metadatum in &fixture.metadata {
        let subject = match &metadatum.subject {
            RawSubject::Show { id } => MetadataSubject::Show(
                *show_ids
                    .get(id)
                    .with_context(|| format!("metadata references unknown show {}", id))?,
            ),
            RawSubject::Season { id } => MetadataSubject::Season(
                *season_ids
                    .get(id)
                    .with_context(|| format!("metadata references unknown season {}", id))?,
            ),
            RawSubject::Timeslot { id } => MetadataSubject::Timeslot(
                *timeslot_ids
                    .get(id)
                    .with_context(|| format!("metadata references unknown timeslot {}", id))?,
            ),
            RawSubject::Website => MetadataSubject::Website,
        };
        repo.set_metadatum(subject, &metadatum.key, &metadatum.value);
    }

    let summary = FixtureSummary {
        terms: fixture.terms.len(),
        shows: fixture.shows.len(),
        seasons: fixture.seasons.len(),
        timeslots: fixture.timeslots.len(),
        blocks: fixture.blocks.len(),
        rules: fixture.show_rules.len() + fixture.range_rules.len(),
    };
    log::info!(
        "loaded fixture: {} terms, {} shows, {} seasons, {} timeslots, {} blocks, {} rules",
        summary.terms,
        summary.shows,
        summary.seasons,
        summary.timeslots,
        summary.blocks,
        summary.rules
    );
    Ok(summary)
}
