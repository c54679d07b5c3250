//! Seam to the puzzle visualization library.
//!
//! Rendering itself (geometry, animation of turns, the canvas) is the
//! visualization library's job. This crate defines the player/vantage traits
//! the coordinator talks to, the quaternion math needed to steer a vantage,
//! and the per-frame orientation animator.

use std::sync::Arc;

pub mod animator;
pub mod math;
pub mod recording;

pub use animator::OrientationAnimator;
pub use math::Quat;

/// Options for appending a move to the player's displayed sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendOptions {
    /// When true the player may cancel an in-flight turn animation to start
    /// this one immediately. Move playback from the cube never cancels.
    pub cancel: bool,
}

/// A renderable camera/view exposed by the visualization library.
pub trait Vantage: Send + Sync {
    fn orientation(&self) -> Quat;
    fn set_orientation(&self, orientation: Quat);
    /// Request that this vantage draws a frame with its current state.
    fn render(&self);
}

/// The displayed puzzle.
pub trait CubePlayer: Send + Sync {
    /// Append a move to the displayed sequence. Notation the player does not
    /// understand is ignored by the library; passing it through is fine.
    fn append_move(&self, notation: &str, options: AppendOptions);
    /// Replace the displayed state/algorithm string. An empty string resets
    /// the player to the solved state.
    fn set_state(&self, alg: &str);
    /// Currently renderable vantages. May be empty until the library has
    /// finished setting up its scene.
    fn vantages(&self) -> Vec<Arc<dyn Vantage>>;
}
