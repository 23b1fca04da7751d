use chrono::{DateTime, Utc};

use super::show::ShowId;
use super::term::TermId;

crate::define_id_type!(
    i64,
    /// Strongly-typed identifier for a show season.
    SeasonId
);

/// A season of a show.
///
/// Seasons map a show onto one university term of scheduled timeslots.
/// A season with `id == None` is a synthesized pseudo-season carrying a
/// filler timeslot; such seasons exist only in memory and are never
/// persisted.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Season {
    pub id: Option<SeasonId>,
    pub show_id: ShowId,
    pub term_id: TermId,
    pub submitted: DateTime<Utc>,
}

impl Season {
    /// Whether this season is a synthesized pseudo-season rather than a
    /// stored one.
    pub fn is_synthetic(&self) -> bool {
        self.id.is_none()
    }
}
