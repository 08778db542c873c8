use clasp_core::IndexChord;
use serde::{Deserialize, Serialize};

/// Handle to one chord occurrence stored in an [`IndexArray`] arena.
///
/// Two slots describe the same piece of string iff they carry the same
/// handle; equal chord values behind different handles are different
/// occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChordHandle(usize);

impl ChordHandle {
    /// Creates a handle from its raw arena position.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw arena position.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

/// Index form of a diagram: `2n` circle slots referencing an arena of chord occurrences.
///
/// The type carries no invariants on its own; see
/// [`validate_array`](crate::validate_array) for the contract a diagram requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexArray {
    occurrences: Vec<IndexChord>,
    slots: Vec<ChordHandle>,
}

impl IndexArray {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles an array from an arena and a slot list without checking either.
    pub fn from_parts(occurrences: Vec<IndexChord>, slots: Vec<ChordHandle>) -> Self {
        Self { occurrences, slots }
    }

    /// Stores a new chord occurrence and returns its handle.
    ///
    /// Every call creates a distinct occurrence, even for equal values.
    pub fn intern(&mut self, chord: IndexChord) -> ChordHandle {
        self.occurrences.push(chord);
        ChordHandle(self.occurrences.len() - 1)
    }

    /// Appends a circle slot holding `handle`.
    pub fn push_slot(&mut self, handle: ChordHandle) {
        self.slots.push(handle);
    }

    /// Number of circle slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the array has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Circle slots in position order.
    pub fn slots(&self) -> &[ChordHandle] {
        &self.slots
    }

    /// Arena of chord occurrences.
    pub fn occurrences(&self) -> &[IndexChord] {
        &self.occurrences
    }

    /// Chord value behind a handle.
    pub fn get(&self, handle: ChordHandle) -> Option<&IndexChord> {
        self.occurrences.get(handle.0)
    }

    /// Chord occupying circle position `position`.
    pub fn chord_at(&self, position: usize) -> Option<&IndexChord> {
        self.slots
            .get(position)
            .and_then(|handle| self.occurrences.get(handle.0))
    }
}
