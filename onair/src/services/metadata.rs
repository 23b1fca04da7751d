//! Textual metadata resolution.
//!
//! Metadata values attach to a subject and fall back to the subject's
//! parent when absent: a timeslot without its own title shows its
//! season's, which in turn shows its show's. The fallback is an explicit
//! walk over typed parent links; nothing is resolved by attribute
//! proxying or runtime type names.

use crate::db::{MetadataRepository, RepositoryResult};
use crate::models::{metadata::keys, MetadataSubject};

/// Upper bound on parent-chain length; a longer walk means the stored
/// links form a cycle.
const MAX_CHAIN: usize = 8;

/// Resolves a metadata value for a subject, consulting parents.
///
/// Returns the first value found walking from the subject up its parent
/// chain, or `None` when no subject in the chain carries the key.
pub fn resolve_metadatum<R: MetadataRepository + ?Sized>(
    repo: &R,
    subject: MetadataSubject,
    key: &str,
) -> RepositoryResult<Option<String>> {
    let mut current = Some(subject);
    let mut steps = 0;
    while let Some(subj) = current {
        if let Some(value) = repo.metadatum(subj, key)? {
            return Ok(Some(value));
        }
        steps += 1;
        if steps >= MAX_CHAIN {
            log::warn!("metadata parent chain for {:?} exceeds {} links", subject, MAX_CHAIN);
            return Ok(None);
        }
        current = repo.metadata_parent(subj)?;
    }
    Ok(None)
}

/// The current title of the subject, inherited if need be.
pub fn title<R: MetadataRepository + ?Sized>(
    repo: &R,
    subject: MetadataSubject,
) -> RepositoryResult<Option<String>> {
    resolve_metadatum(repo, subject, keys::TITLE)
}

/// The current description of the subject, inherited if need be.
pub fn description<R: MetadataRepository + ?Sized>(
    repo: &R,
    subject: MetadataSubject,
) -> RepositoryResult<Option<String>> {
    resolve_metadatum(repo, subject, keys::DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use crate::models::{ShowType, ShowTypeId};
    use chrono::{TimeDelta, TimeZone, Utc};

    fn seeded() -> (LocalRepository, MetadataSubject, MetadataSubject) {
        let repo = LocalRepository::new();
        let start = Utc.with_ymd_and_hms(2012, 10, 1, 0, 0, 0).unwrap();
        let term = repo.store_term("Autumn", start, start + TimeDelta::weeks(10));
        let show = repo.store_show(
            "Breakfast",
            ShowType {
                id: ShowTypeId(1),
                name: "Show".to_string(),
                public: true,
                has_showdb_entry: true,
            },
        );
        let season = repo.store_season(show, term, start);
        let slot = repo.store_timeslot(season, start, TimeDelta::hours(2));
        repo.set_metadatum(MetadataSubject::Show(show), keys::TITLE, "Breakfast");
        (repo, MetadataSubject::Show(show), MetadataSubject::Timeslot(slot))
    }

    #[test]
    fn direct_value_wins() {
        let (repo, show, slot) = seeded();
        repo.set_metadatum(slot, keys::TITLE, "Breakfast Special");
        assert_eq!(title(&repo, slot).unwrap().as_deref(), Some("Breakfast Special"));
        assert_eq!(title(&repo, show).unwrap().as_deref(), Some("Breakfast"));
    }

    #[test]
    fn absent_value_inherits_from_the_show() {
        let (repo, _, slot) = seeded();
        assert_eq!(title(&repo, slot).unwrap().as_deref(), Some("Breakfast"));
    }

    #[test]
    fn missing_everywhere_is_none() {
        let (repo, _, slot) = seeded();
        assert_eq!(description(&repo, slot).unwrap(), None);
    }

    #[test]
    fn website_is_an_ordinary_subject() {
        let (repo, _, _) = seeded();
        repo.set_metadatum(MetadataSubject::Website, keys::TITLE, "On Air FM");
        assert_eq!(
            title(&repo, MetadataSubject::Website).unwrap().as_deref(),
            Some("On Air FM")
        );
    }
}
