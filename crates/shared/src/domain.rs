use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single move reported by the cube, in standard face notation.
///
/// The raw notation string is kept as received from the driver: decoding is
/// the driver's job, and unknown notation must still flow through history and
/// the visualization even when no audio cue exists for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub notation: String,
    /// Cube onboard clock at the time of the turn, in milliseconds. Absent on
    /// hardware revisions that do not timestamp moves.
    pub cube_timestamp_ms: Option<f64>,
    /// Host clock at event arrival, in milliseconds since the Unix epoch.
    pub host_timestamp_ms: f64,
}

impl MoveEvent {
    pub fn new(
        notation: impl Into<String>,
        cube_timestamp_ms: Option<f64>,
        host_timestamp_ms: f64,
    ) -> Self {
        Self {
            notation: notation.into(),
            cube_timestamp_ms,
            host_timestamp_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    R,
    L,
    U,
    D,
    F,
    B,
    /// Middle slice, synthesized from two opposite face turns. The cube
    /// hardware never reports this face itself.
    M,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Clockwise,
    Counterclockwise,
}

/// A validated move token: one of the 12 quarter turns the cube can report,
/// or one of the 2 synthesized slice turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveToken {
    pub face: Face,
    pub direction: Direction,
}

impl MoveToken {
    pub const fn new(face: Face, direction: Direction) -> Self {
        Self { face, direction }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized move notation: {0:?}")]
pub struct UnknownNotation(pub String);

impl FromStr for MoveToken {
    type Err = UnknownNotation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (face_str, direction) = match s.strip_suffix('\'') {
            Some(base) => (base, Direction::Counterclockwise),
            None => (s, Direction::Clockwise),
        };
        let face = match face_str {
            "R" => Face::R,
            "L" => Face::L,
            "U" => Face::U,
            "D" => Face::D,
            "F" => Face::F,
            "B" => Face::B,
            "M" => Face::M,
            _ => return Err(UnknownNotation(s.to_string())),
        };
        Ok(Self { face, direction })
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = match self.face {
            Face::R => "R",
            Face::L => "L",
            Face::U => "U",
            Face::D => "D",
            Face::F => "F",
            Face::B => "B",
            Face::M => "M",
        };
        match self.direction {
            Direction::Clockwise => write!(f, "{face}"),
            Direction::Counterclockwise => write!(f, "{face}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_round_trips_for_quarter_turns() {
        for s in ["R", "L", "U", "D", "F", "B", "M", "R'", "L'", "M'"] {
            let token: MoveToken = s.parse().unwrap();
            assert_eq!(token.to_string(), s);
        }
    }

    #[test]
    fn double_turns_and_wide_moves_are_rejected() {
        assert!("R2".parse::<MoveToken>().is_err());
        assert!("Rw".parse::<MoveToken>().is_err());
        assert!("x".parse::<MoveToken>().is_err());
        assert!("".parse::<MoveToken>().is_err());
    }
}
