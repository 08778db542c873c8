//! Immutable chord value types used by both diagram representations.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ClaspError, ErrorInfo};

/// Orientation of a clasp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sign {
    /// Positive clasp, written `+`.
    #[serde(rename = "+")]
    Positive,
    /// Negative clasp, written `-`.
    #[serde(rename = "-")]
    Negative,
}

impl Sign {
    /// Returns the diagonal entry this sign contributes to the sign matrix.
    pub const fn value(self) -> i64 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }

    /// Returns the single character notation of the sign.
    pub const fn as_char(self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }

    /// Returns the opposite sign.
    pub const fn flipped(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

impl TryFrom<char> for Sign {
    type Error = ClaspError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Sign::Positive),
            '-' => Ok(Sign::Negative),
            other => Err(ClaspError::Type(
                ErrorInfo::new("invalid-sign", "sign must be '+' or '-'")
                    .with_context("sign", other),
            )),
        }
    }
}

impl FromStr for Sign {
    type Err = ClaspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Sign::try_from(c),
            _ => Err(ClaspError::Type(
                ErrorInfo::new("invalid-sign", "sign must be '+' or '-'").with_context("sign", s),
            )),
        }
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Geometric chord: two circle points, a sign and a height.
///
/// A well formed chord satisfies `start < end`; the enclosing matrix is
/// responsible for the range and coverage contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IntervalChord {
    /// First circle point touched by the chord.
    pub start: usize,
    /// Second circle point touched by the chord.
    pub end: usize,
    /// Clasp sign.
    pub sign: Sign,
    /// Position of the chord in the height order (1-based).
    pub height: usize,
}

impl IntervalChord {
    /// Creates a chord from its four fields.
    pub const fn new(start: usize, end: usize, sign: Sign, height: usize) -> Self {
        Self {
            start,
            end,
            sign,
            height,
        }
    }

    /// Returns a copy of the chord with a different height.
    pub const fn with_height(self, height: usize) -> Self {
        Self { height, ..self }
    }

    /// Whether both endpoints are adjacent on a circle with `points` points.
    pub fn closes_immediately(&self, points: usize) -> bool {
        self.end == self.start + 1 || (self.start == 0 && points > 0 && self.end == points - 1)
    }
}

impl Display for IntervalChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.start, self.end, self.sign, self.height
        )
    }
}

/// Index chord: the payload referenced twice from the array representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndexChord {
    /// Row of the chord in the canonical matrix (1-based).
    pub index: usize,
    /// Clasp sign.
    pub sign: Sign,
    /// Position of the chord in the height order (1-based).
    pub height: usize,
}

impl IndexChord {
    /// Creates an index chord from its fields.
    pub const fn new(index: usize, sign: Sign, height: usize) -> Self {
        Self {
            index,
            sign,
            height,
        }
    }
}

impl Display for IndexChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.index, self.sign, self.height)
    }
}
