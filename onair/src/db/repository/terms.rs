//! University term lookup trait.

use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::models::Term;

/// Repository trait for university term queries.
///
/// Terms do not cover all time - there are inter-term holidays - so both
/// queries can legitimately come back empty.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so services can be called from
/// concurrent request handlers.
pub trait TermRepository: Send + Sync {
    /// Find the term whose `[start, end)` interval contains the instant.
    ///
    /// # Arguments
    /// * `instant` - The instant to look up
    ///
    /// # Returns
    /// * `Ok(Some(Term))` - The containing term
    /// * `Ok(None)` - The instant falls in a holiday or outside all terms
    /// * `Err(RepositoryError)` - If the operation fails
    fn term_containing(&self, instant: DateTime<Utc>) -> RepositoryResult<Option<Term>>;

    /// List all terms whose end instant is at or before the given instant,
    /// ordered ascending by end instant.
    ///
    /// # Arguments
    /// * `instant` - The instant terms must have ended by
    ///
    /// # Returns
    /// * `Ok(Vec<Term>)` - May be empty if the instant precedes all terms
    /// * `Err(RepositoryError)` - If the operation fails
    fn terms_ending_at_or_before(&self, instant: DateTime<Utc>) -> RepositoryResult<Vec<Term>>;
}
