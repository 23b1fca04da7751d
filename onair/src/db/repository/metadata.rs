//! Textual metadata storage and its inheritance links.

use super::error::RepositoryResult;
use crate::models::MetadataSubject;

/// Repository trait for textual metadata lookups.
///
/// Metadata is a key-value store attached to schedule subjects. A subject
/// without a value for some key may inherit one from its parent subject;
/// the parent link is explicit and walked by
/// [`crate::services::metadata::resolve_metadatum`], never implicitly.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so services can be called from
/// concurrent request handlers.
pub trait MetadataRepository: Send + Sync {
    /// The value stored for `key` directly on `subject`, if any.
    ///
    /// # Arguments
    /// * `subject` - The subject the value is attached to
    /// * `key` - The metadata key name
    ///
    /// # Returns
    /// * `Ok(Some(String))` - A value attached directly to the subject
    /// * `Ok(None)` - No direct value; the caller may consult the parent
    /// * `Err(RepositoryError)` - If the operation fails
    fn metadatum(
        &self,
        subject: MetadataSubject,
        key: &str,
    ) -> RepositoryResult<Option<String>>;

    /// The subject this subject inherits metadata from, if any.
    ///
    /// Timeslots inherit from their season, seasons from their show;
    /// shows and the website subject inherit from nothing.
    ///
    /// # Returns
    /// * `Ok(Some(MetadataSubject))` - The parent subject
    /// * `Ok(None)` - The subject is a chain root
    /// * `Err(RepositoryError::NotFound)` - If the subject is unknown
    fn metadata_parent(
        &self,
        subject: MetadataSubject,
    ) -> RepositoryResult<Option<MetadataSubject>>;
}
