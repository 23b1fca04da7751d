use super::season::SeasonId;
use super::show::ShowId;
use super::timeslot::TimeslotId;

/// The closed set of things metadata can be attached to.
///
/// Subjects form an explicit inheritance chain (timeslot -> season ->
/// show); the website front page is an ordinary well-known subject rather
/// than a runtime singleton.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MetadataSubject {
    Show(ShowId),
    Season(SeasonId),
    Timeslot(TimeslotId),
    Website,
}

/// Well-known metadata key names.
pub mod keys {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
}
