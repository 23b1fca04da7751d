//! Term calendar lookups.
//!
//! Resolves instants to university terms or to the holiday between terms.
//! Terms do not cover all time, so an empty result is expected, not an
//! error.

use chrono::{DateTime, Utc};

use crate::db::{RepositoryResult, TermRepository};
use crate::models::Term;

/// Where an instant sits relative to the term calendar.
#[derive(Debug, Clone, PartialEq)]
pub enum TermStatus {
    /// The instant falls inside a term.
    InTerm(Term),
    /// The instant falls in the holiday after the given term.
    Holiday { preceding: Term },
    /// The instant precedes every known term.
    BeforeFirstTerm,
}

/// Returns the term containing the given instant, or `None` if the
/// instant does not lie in any known term.
pub fn term_of<R: TermRepository + ?Sized>(
    repo: &R,
    instant: DateTime<Utc>,
) -> RepositoryResult<Option<Term>> {
    repo.term_containing(instant)
}

/// Returns the term with the latest end at or before the given instant.
///
/// Assuming the instant does not belong to a term, this finds the term
/// whose holiday the instant is in; `None` means the instant precedes
/// every known term.
pub fn term_before<R: TermRepository + ?Sized>(
    repo: &R,
    instant: DateTime<Utc>,
) -> RepositoryResult<Option<Term>> {
    let terms = repo.terms_ending_at_or_before(instant)?;
    Ok(terms.into_iter().next_back())
}

/// Classifies an instant against the term calendar.
///
/// Used by the broadcast-status flags: the station is on full schedule
/// when in term, and on reduced/sustainer output otherwise.
pub fn term_status<R: TermRepository + ?Sized>(
    repo: &R,
    instant: DateTime<Utc>,
) -> RepositoryResult<TermStatus> {
    if let Some(term) = term_of(repo, instant)? {
        return Ok(TermStatus::InTerm(term));
    }
    Ok(match term_before(repo, instant)? {
        Some(preceding) => TermStatus::Holiday { preceding },
        None => TermStatus::BeforeFirstTerm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use chrono::{TimeDelta, TimeZone};

    fn repo_with_terms() -> (LocalRepository, DateTime<Utc>) {
        let repo = LocalRepository::new();
        let autumn = Utc.with_ymd_and_hms(2012, 10, 1, 0, 0, 0).unwrap();
        repo.store_term("Autumn", autumn, autumn + TimeDelta::weeks(10));
        let spring = Utc.with_ymd_and_hms(2013, 1, 7, 0, 0, 0).unwrap();
        repo.store_term("Spring", spring, spring + TimeDelta::weeks(10));
        (repo, autumn)
    }

    #[test]
    fn term_of_finds_containing_term() {
        let (repo, autumn) = repo_with_terms();
        let term = term_of(&repo, autumn + TimeDelta::weeks(3)).unwrap().unwrap();
        assert_eq!(term.name, "Autumn");
    }

    #[test]
    fn term_of_is_none_in_holidays() {
        let (repo, autumn) = repo_with_terms();
        // Between the end of Autumn and the start of Spring.
        assert_eq!(term_of(&repo, autumn + TimeDelta::weeks(11)).unwrap(), None);
    }

    #[test]
    fn term_before_identifies_the_holiday() {
        let (repo, autumn) = repo_with_terms();
        let term = term_before(&repo, autumn + TimeDelta::weeks(11))
            .unwrap()
            .unwrap();
        assert_eq!(term.name, "Autumn");
    }

    #[test]
    fn term_before_is_none_before_all_terms() {
        let (repo, autumn) = repo_with_terms();
        assert_eq!(
            term_before(&repo, autumn - TimeDelta::weeks(1)).unwrap(),
            None
        );
    }

    #[test]
    fn term_status_distinguishes_all_three_cases() {
        let (repo, autumn) = repo_with_terms();
        assert!(matches!(
            term_status(&repo, autumn).unwrap(),
            TermStatus::InTerm(_)
        ));
        assert!(matches!(
            term_status(&repo, autumn + TimeDelta::weeks(11)).unwrap(),
            TermStatus::Holiday { .. }
        ));
        assert_eq!(
            term_status(&repo, autumn - TimeDelta::days(1)).unwrap(),
            TermStatus::BeforeFirstTerm
        );
    }
}
