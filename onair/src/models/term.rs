use chrono::{DateTime, Datelike, Utc};

crate::define_id_type!(
    i64,
    /// Strongly-typed identifier for a university term.
    TermId
);

/// An entry in the university terms set.
///
/// A term covers the half-open interval `[start, end)`. Terms are
/// maintained externally and assumed non-overlapping; the schedule core
/// only reads and classifies against them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Term {
    pub id: TermId,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Term {
    /// Whether the given instant falls within this term.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// The academic year this term belongs to.
    ///
    /// A term starting before September belongs to the academic year that
    /// began the previous calendar year (Spring and Summer terms).
    pub fn academic_year(&self) -> i32 {
        if self.start.month() >= 9 {
            self.start.year()
        } else {
            self.start.year() - 1
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let year = self.academic_year();
        write!(f, "{} Term {}/{}", self.name, year, (year + 1) % 100)
    }
}
