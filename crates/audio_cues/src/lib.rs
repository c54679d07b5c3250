//! Musical cues for cube moves.
//!
//! Each move token maps to a fixed note clip; clockwise turns sit an octave
//! below their counterclockwise counterparts. Unknown tokens are silent by
//! design, and playback problems never reach the user.

pub mod player;

use shared::domain::{Direction, Face, MoveToken};

pub use player::{CuePlayer, RodioCuePlayer};

/// Clip file for a move token, relative to the sounds directory.
///
/// Returns `None` for anything outside the 12 quarter turns and the 2
/// synthesized slice turns; callers treat that as "no cue", not an error.
pub fn clip_for(notation: &str) -> Option<&'static str> {
    let token: MoveToken = notation.parse().ok()?;
    let clip = match (token.face, token.direction) {
        (Face::R, Direction::Clockwise) => "c3.mp3",
        (Face::L, Direction::Clockwise) => "d3.mp3",
        (Face::U, Direction::Clockwise) => "e3.mp3",
        (Face::D, Direction::Clockwise) => "f3.mp3",
        (Face::F, Direction::Clockwise) => "g3.mp3",
        (Face::B, Direction::Clockwise) => "a4.mp3",
        (Face::M, Direction::Clockwise) => "b3.mp3",
        (Face::R, Direction::Counterclockwise) => "c4.mp3",
        (Face::L, Direction::Counterclockwise) => "d4.mp3",
        (Face::U, Direction::Counterclockwise) => "e4.mp3",
        (Face::D, Direction::Counterclockwise) => "f4.mp3",
        (Face::F, Direction::Counterclockwise) => "g4.mp3",
        (Face::B, Direction::Counterclockwise) => "a5.mp3",
        (Face::M, Direction::Counterclockwise) => "b4.mp3",
    };
    Some(clip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_quarter_turn_and_slice_has_a_clip() {
        let tokens = [
            "R", "L", "U", "D", "F", "B", "M", "R'", "L'", "U'", "D'", "F'", "B'", "M'",
        ];
        for token in tokens {
            assert!(clip_for(token).is_some(), "missing clip for {token}");
        }
    }

    #[test]
    fn clips_are_distinct() {
        let tokens = [
            "R", "L", "U", "D", "F", "B", "M", "R'", "L'", "U'", "D'", "F'", "B'", "M'",
        ];
        let mut clips: Vec<_> = tokens.iter().map(|t| clip_for(t).unwrap()).collect();
        clips.sort_unstable();
        clips.dedup();
        assert_eq!(clips.len(), tokens.len());
    }

    #[test]
    fn unknown_notation_is_silent() {
        assert_eq!(clip_for("R2"), None);
        assert_eq!(clip_for("x"), None);
        assert_eq!(clip_for(""), None);
    }
}
