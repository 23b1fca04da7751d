//! Loading of schedule fixture data into a local repository.

pub mod loaders;

pub use loaders::{load_fixture, load_fixture_str, FixtureSummary};
