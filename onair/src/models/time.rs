//! Serde support for schedule durations.

/// Serializes a [`chrono::TimeDelta`] as a whole number of seconds.
///
/// Durations and clock offsets in the schedule are second-granular, so
/// sub-second precision is deliberately not carried. Use via
/// `#[serde(with = "crate::models::time::serde_secs")]`.
pub mod serde_secs {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        value.num_seconds().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        Ok(TimeDelta::seconds(i64::deserialize(deserializer)?))
    }
}
