#![deny(missing_docs)]
#![doc = include_str!("../docs/diagram-api.md")]

//! Validated clasp diagrams, their two representations and the moves between them.

mod array;
mod config;
mod diagram;
mod explore;
mod generators;
mod hash;
mod moves;
mod serialization;
mod transform;
mod validate;

pub use array::{ChordHandle, IndexArray};
pub use config::{ExplorationConfig, InvariantCheck, MoveConfig};
pub use diagram::ClaspDiagram;
pub use explore::{applicable_moves, random_walk};
pub use generators::{random_diagrams, random_valid_array, random_valid_matrix};
pub use hash::canonical_hash;
pub use moves::{
    add_isolated_chord, cyclic_height_shift, erase_isolated_chord, erase_isolated_chord_with,
    exchange_heights, inverse_cyclic_height_shift, Move, MoveKind, MoveParams, MOVE_TABLE,
};
pub use transform::{array_to_matrix, matrix_to_array};
pub use validate::{validate_array, validate_matrix};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{diagram_from_bytes, diagram_from_json, diagram_to_bytes, diagram_to_json};
