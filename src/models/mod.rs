//! Timetable domain models.
//!
//! Provides the core data types for representing recurring weekly
//! meeting times and the combinations built from them.
//!
//! # Time Model
//!
//! Clock times are minutes from midnight (`0..=1440`); a week is seven
//! [`Weekday`]s. A [`Meeting`] is the raw catalog datum; a
//! [`TimePattern`] is its compact, comparable encoding; a
//! [`PlacedBlock`] is one rendered occurrence.

mod block;
mod combination;
mod course;
mod meeting;
mod pattern;
pub mod time;

pub use block::{BlockSource, PlacedBlock};
pub use combination::Combination;
pub use course::{Course, Section, SectionChoice, Selection};
pub use meeting::Meeting;
pub use pattern::{TimePattern, TimeTriple};
pub use time::{Date, DateRange, Weekday, WEEKDAYS};
