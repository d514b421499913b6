//! Course timetable engine.
//!
//! Enumerates every conflict-free way to pick one section per selected
//! course and ranks the resulting combinations by configurable, weighted
//! quality criteria, exposing ordered paginated access without paying
//! full-sort cost.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Meeting`, `TimePattern`, `PlacedBlock`,
//!   `Course`, `Section`, `Selection`, `Combination`
//! - **`catalog`**: External collaborators — the `Catalog` trait and the
//!   building `DistanceMatrix`
//! - **`generator`**: Depth-first constrained enumeration of valid
//!   section combinations, bounded by a cap and forbidden time windows
//! - **`ranking`**: Per-criterion scoring, cascade/weighted ordering, and
//!   partial-selection pagination
//! - **`engine`**: The request/response facade tying generation and
//!   ranking together
//! - **`validation`**: Integrity checks for ranking configurations and
//!   time filters
//!
//! # Determinism
//!
//! Generation and ranking are synchronous, single-threaded, and produce
//! identical output for identical (selection, catalog snapshot,
//! configuration) input. The opt-in shuffle criterion draws from a seed
//! carried in the configuration, so even "random" orderings reproduce.

pub mod catalog;
pub mod engine;
pub mod generator;
pub mod models;
pub mod ranking;
pub mod validation;

mod error;

pub use error::{Error, Result};
