//! Trait implementations that record instead of rendering. Used by the
//! headless simulator and by tests across the workspace.

use std::sync::{Arc, Mutex};

use crate::math::Quat;
use crate::{AppendOptions, CubePlayer, Vantage};

/// A vantage that keeps its orientation in memory and counts render requests.
#[derive(Default)]
pub struct RecordingVantage {
    orientation: Mutex<Quat>,
    renders: Mutex<u64>,
}

impl RecordingVantage {
    pub fn render_count(&self) -> u64 {
        *self.renders.lock().unwrap()
    }
}

impl Vantage for RecordingVantage {
    fn orientation(&self) -> Quat {
        *self.orientation.lock().unwrap()
    }

    fn set_orientation(&self, orientation: Quat) {
        *self.orientation.lock().unwrap() = orientation;
    }

    fn render(&self) {
        *self.renders.lock().unwrap() += 1;
    }
}

/// A player that records appended moves and state changes.
pub struct RecordingPlayer {
    moves: Mutex<Vec<String>>,
    state: Mutex<Option<String>>,
    vantage: Arc<RecordingVantage>,
    /// When false, `vantages()` returns nothing, mimicking a scene that has
    /// not finished loading.
    vantage_ready: Mutex<bool>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self {
            moves: Mutex::new(Vec::new()),
            state: Mutex::new(None),
            vantage: Arc::new(RecordingVantage::default()),
            vantage_ready: Mutex::new(true),
        }
    }

    pub fn with_deferred_vantage() -> Self {
        let player = Self::new();
        *player.vantage_ready.lock().unwrap() = false;
        player
    }

    pub fn make_vantage_ready(&self) {
        *self.vantage_ready.lock().unwrap() = true;
    }

    pub fn appended_moves(&self) -> Vec<String> {
        self.moves.lock().unwrap().clone()
    }

    /// Last state string set through the player, if any.
    pub fn state(&self) -> Option<String> {
        self.state.lock().unwrap().clone()
    }

    pub fn vantage(&self) -> Arc<RecordingVantage> {
        self.vantage.clone()
    }
}

impl Default for RecordingPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl CubePlayer for RecordingPlayer {
    fn append_move(&self, notation: &str, _options: AppendOptions) {
        self.moves.lock().unwrap().push(notation.to_string());
    }

    fn set_state(&self, alg: &str) {
        *self.state.lock().unwrap() = Some(alg.to_string());
    }

    fn vantages(&self) -> Vec<Arc<dyn Vantage>> {
        if *self.vantage_ready.lock().unwrap() {
            vec![self.vantage.clone()]
        } else {
            Vec::new()
        }
    }
}
