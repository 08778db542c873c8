use clasp_alexander::LaurentPolynomial;
use clasp_core::{ClaspError, ErrorInfo, IntervalChord, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::diagram::ClaspDiagram;

/// Serializes the diagram to a compact binary representation using `bincode`.
pub fn diagram_to_bytes(diagram: &ClaspDiagram) -> Result<Vec<u8>, ClaspError> {
    let serializable = SerializableDiagram::from_diagram(diagram);
    bincode::serialize(&serializable)
        .map_err(|err| ClaspError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a diagram from its binary representation.
pub fn diagram_from_bytes(bytes: &[u8]) -> Result<ClaspDiagram, ClaspError> {
    let serializable: SerializableDiagram = bincode::deserialize(bytes)
        .map_err(|err| ClaspError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_diagram()
}

/// Serializes the diagram to a JSON string.
pub fn diagram_to_json(diagram: &ClaspDiagram) -> Result<String, ClaspError> {
    let serializable = SerializableDiagram::from_diagram(diagram);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| ClaspError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a diagram from a JSON string.
///
/// The chords re-enter full validation; a stored polynomial that disagrees
/// with the recomputed one is rejected.
pub fn diagram_from_json(json: &str) -> Result<ClaspDiagram, ClaspError> {
    let serializable: SerializableDiagram = serde_json::from_str(json)
        .map_err(|err| ClaspError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_diagram()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableDiagram {
    schema_version: SchemaVersion,
    chords: Vec<IntervalChord>,
    alexander: Option<LaurentPolynomial>,
}

impl SerializableDiagram {
    fn from_diagram(diagram: &ClaspDiagram) -> Self {
        Self {
            schema_version: SchemaVersion::default(),
            chords: diagram.matrix().to_vec(),
            alexander: Some(diagram.alexander().clone()),
        }
    }

    fn into_diagram(self) -> Result<ClaspDiagram, ClaspError> {
        let current = SchemaVersion::default();
        if !current.is_compatible_with(&self.schema_version) {
            return Err(ClaspError::Serde(
                ErrorInfo::new("schema-mismatch", "payload written under another major version")
                    .with_context("found", format_version(&self.schema_version))
                    .with_context("expected", format_version(&current)),
            ));
        }
        let diagram = ClaspDiagram::from_matrix(self.chords)?;
        if let Some(stored) = self.alexander {
            if &stored != diagram.alexander() {
                return Err(ClaspError::Serde(
                    ErrorInfo::new(
                        "alexander-mismatch",
                        "stored polynomial differs from the recomputed one",
                    )
                    .with_context("stored", stored)
                    .with_context("computed", diagram.alexander()),
                ));
            }
        }
        Ok(diagram)
    }
}

fn format_version(version: &SchemaVersion) -> String {
    format!("{}.{}.{}", version.major, version.minor, version.patch)
}
