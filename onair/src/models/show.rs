crate::define_id_type!(
    i64,
    /// Strongly-typed identifier for a show.
    ShowId
);

crate::define_id_type!(
    i64,
    /// Strongly-typed identifier for a show type.
    ShowTypeId
);

/// A type of show in the schedule.
///
/// The show type decides, amongst other things, whether shows of that type
/// appear in the public schedule at all.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShowType {
    pub id: ShowTypeId,
    pub name: String,
    pub public: bool,
    pub has_showdb_entry: bool,
}

/// A show in the station schedule.
///
/// Show objects represent the part of a show that is constant across any
/// timeslots it is scheduled into: its title, its type, and the people
/// credited on it over time.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub title: String,
    pub show_type: ShowType,
}

impl std::fmt::Display for Show {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}
