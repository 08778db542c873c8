#![deny(missing_docs)]
//! Core value types for clasp diagrams: chords, signs, geometric predicates,
//! structured errors and deterministic randomness.

pub mod chord;
pub mod errors;
pub mod geometry;
pub mod rng;
mod schema;

pub use chord::{IndexChord, IntervalChord, Sign};
pub use errors::{ClaspError, ErrorInfo};
pub use geometry::{chords_intersect, consecutive_heights};
pub use rng::{derive_substream_seed, RngHandle};
pub use schema::SchemaVersion;
