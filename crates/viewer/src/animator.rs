//! Per-frame orientation smoothing for the displayed cube.

use std::sync::Arc;

use tracing::debug;

use crate::math::Quat;
use crate::{CubePlayer, Vantage};

/// Fraction of the remaining angular distance covered each frame.
const SMOOTHING: f32 = 0.25;

/// Resting orientation of the displayed cube: tilted 30° down and 30° to the
/// side so three faces are visible.
pub fn default_target() -> Quat {
    Quat::from_euler(
        30.0_f32.to_radians(),
        -30.0_f32.to_radians(),
        0.0,
    )
}

/// Nudges the scene orientation toward a fixed target once per display frame.
///
/// The vantage is resolved lazily on the first tick where the player exposes
/// one, then memoized. Each tick covers a fixed fraction of the remaining
/// distance, so the orientation approaches the target asymptotically and
/// never snaps. There is no stop condition; the animator runs for as long as
/// the application drives frames.
pub struct OrientationAnimator {
    target: Quat,
    vantage: Option<Arc<dyn Vantage>>,
}

impl OrientationAnimator {
    pub fn new() -> Self {
        Self {
            target: default_target(),
            vantage: None,
        }
    }

    pub fn with_target(target: Quat) -> Self {
        Self {
            target,
            vantage: None,
        }
    }

    /// Advance one frame: slerp toward the target and request a render.
    /// Does nothing while the player has no vantage yet.
    pub fn tick(&mut self, player: &dyn CubePlayer) {
        if self.vantage.is_none() {
            self.vantage = player.vantages().into_iter().next();
            if self.vantage.is_some() {
                debug!("resolved first vantage for orientation animation");
            }
        }
        let Some(vantage) = &self.vantage else {
            return;
        };
        let current = vantage.orientation();
        vantage.set_orientation(current.slerp(self.target, SMOOTHING));
        vantage.render();
    }
}

impl Default for OrientationAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/animator_tests.rs"]
mod tests;
