//! onair - schedule computation backend for student radio programming.
//!
//! The crate reconstructs a gapless, ordered view of on-air programming
//! from a store of possibly-overlapping timeslots: range queries with
//! boundary policies and filler padding, block classification through a
//! layered rule system, and tabulation of a week into a row-compressed
//! grid ready for calendar-style rendering.
//!
//! Persistence, HTTP routing, rendering and authentication live
//! elsewhere; this crate consumes a handful of read-only queries (the
//! [`db::repository`] traits) and produces plain data structures.

pub mod config;
pub mod db;
pub mod io;
pub mod models;
pub mod services;
