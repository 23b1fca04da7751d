//! Data access layer: repository trait definitions and implementations.

pub mod repositories;
pub mod repository;

pub use repositories::LocalRepository;
pub use repository::{
    BlockRepository, FullRepository, MetadataRepository, RepositoryError, RepositoryResult,
    TermRepository, TimeslotRepository,
};
