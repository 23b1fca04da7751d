use chrono::TimeDelta;

use super::show::ShowId;

crate::define_id_type!(
    i64,
    /// Strongly-typed identifier for a programming block.
    BlockId
);

crate::define_id_type!(
    i64,
    /// Strongly-typed identifier for a block matching rule.
    RuleId
);

/// A block of programming.
///
/// Schedule blocks group together related shows, such as specialist music
/// and flagship blocks, by time or by direct assignment.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub id: BlockId,
    /// The publicly viewable name for this block.
    pub name: String,
    /// Machine-readable identifier, used for example as the prefix of the
    /// CSS classes that colour this block.
    pub tag: String,
    /// The priority of this block when deciding which block a show falls
    /// into. A lower number indicates a higher priority.
    pub priority: i32,
    /// If true, the block appears in lists of blocks, allowing people to
    /// find shows in that block.
    pub is_listable: bool,
}

/// A show-based matching rule for blocks.
///
/// Matches the attached show only. Show rules take precedence over all
/// other rule kinds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlockShowRule {
    pub id: RuleId,
    pub block_id: BlockId,
    pub show_id: ShowId,
}

/// A time-range matching rule for blocks.
///
/// The rule's interval is expressed as offsets from local midnight, not
/// absolute instants, and `end_offset` may exceed 24 hours to describe a
/// range that crosses midnight (for example 23:00 to 26:00).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlockRangeRule {
    pub id: RuleId,
    pub block_id: BlockId,
    #[serde(with = "crate::models::time::serde_secs")]
    pub start_offset: TimeDelta,
    #[serde(with = "crate::models::time::serde_secs")]
    pub end_offset: TimeDelta,
}

impl BlockRangeRule {
    /// Whether the rule's interval wholly contains the given
    /// midnight-relative slot interval.
    pub fn covers(&self, slot_start: TimeDelta, slot_end: TimeDelta) -> bool {
        self.start_offset <= slot_start && self.end_offset >= slot_end
    }
}
