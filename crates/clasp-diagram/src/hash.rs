use clasp_core::{IntervalChord, SchemaVersion};
use sha2::{Digest, Sha256};

use crate::diagram::ClaspDiagram;

/// Computes the canonical SHA-256 hash of a diagram as lowercase hex.
///
/// The canonical matrix is unique per diagram, so equal diagrams hash
/// equally no matter which representation they were built from.
pub fn canonical_hash(diagram: &ClaspDiagram) -> String {
    let mut hasher = Sha256::new();
    encode_schema(&SchemaVersion::default(), &mut hasher);
    hasher.update((diagram.chord_count() as u64).to_le_bytes());
    for chord in diagram.matrix() {
        encode_chord(chord, &mut hasher);
    }
    format!("{:x}", hasher.finalize())
}

fn encode_schema(version: &SchemaVersion, hasher: &mut Sha256) {
    hasher.update(b"clasp-diagram");
    hasher.update(version.major.to_le_bytes());
    hasher.update(version.minor.to_le_bytes());
    hasher.update(version.patch.to_le_bytes());
}

fn encode_chord(chord: &IntervalChord, hasher: &mut Sha256) {
    hasher.update((chord.start as u64).to_le_bytes());
    hasher.update((chord.end as u64).to_le_bytes());
    hasher.update([chord.sign.as_char() as u8]);
    hasher.update((chord.height as u64).to_le_bytes());
}
