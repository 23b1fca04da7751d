//! Block matching rule queries.

use super::error::RepositoryResult;
use crate::models::{Block, BlockRangeRule, BlockShowRule, ShowId};

/// Repository trait for block matching rule queries.
///
/// Rules come back joined with the [`Block`] they assign, since rule
/// selection orders on the block's priority.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so services can be called from
/// concurrent request handlers.
pub trait BlockRepository: Send + Sync {
    /// All show-level rules attached to the given show, in storage order.
    ///
    /// # Arguments
    /// * `show_id` - The show the rules are attached to
    ///
    /// # Returns
    /// * `Ok(Vec<(BlockShowRule, Block)>)` - May be empty
    /// * `Err(RepositoryError)` - If the operation fails
    fn show_block_rules(&self, show_id: ShowId)
        -> RepositoryResult<Vec<(BlockShowRule, Block)>>;

    /// All time-range rules, in storage order.
    ///
    /// # Returns
    /// * `Ok(Vec<(BlockRangeRule, Block)>)` - May be empty
    /// * `Err(RepositoryError)` - If the operation fails
    fn range_block_rules(&self) -> RepositoryResult<Vec<(BlockRangeRule, Block)>>;
}
