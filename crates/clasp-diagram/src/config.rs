use serde::{Deserialize, Serialize};

/// How a move compares the polynomial of its result with the input's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvariantCheck {
    /// Accept results whose polynomial differs by an overall factor of `-1`.
    #[default]
    UpToSign,
    /// Require identical polynomials.
    ///
    /// Erasing or adding a positive isolated chord flips the determinant
    /// sign, so those moves fail this check.
    Exact,
}

/// Options governing move application.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveConfig {
    /// Invariant comparison applied after every move.
    #[serde(default)]
    pub invariant_check: InvariantCheck,
    /// Restrict erasure to chords whose endpoints are adjacent on the circle.
    #[serde(default)]
    pub require_immediate_closure: bool,
}

/// Parameters of a random move walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationConfig {
    /// Number of moves to apply.
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Chord count above which chord insertions are no longer proposed.
    #[serde(default = "default_max_chords")]
    pub max_chords: usize,
    /// Move options used for every step.
    #[serde(default)]
    pub moves: MoveConfig,
}

fn default_steps() -> usize {
    16
}

fn default_max_chords() -> usize {
    8
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            max_chords: default_max_chords(),
            moves: MoveConfig::default(),
        }
    }
}
