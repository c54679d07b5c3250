//! egui-backed implementation of the visualization seam.
//!
//! The backend worker appends moves and clears state through the `CubePlayer`
//! trait; the egui thread reads the same object to draw. A vantage becomes
//! available only once the egui context is attached, which is what lets the
//! orientation animator resolve it lazily, the same way a real scene finishes
//! loading some frames after startup.

use std::sync::{Arc, Mutex};

use viewer::{AppendOptions, CubePlayer, Quat, Vantage};

pub struct EguiVantage {
    orientation: Mutex<Quat>,
    ctx: Mutex<Option<egui::Context>>,
}

impl EguiVantage {
    fn new() -> Self {
        Self {
            orientation: Mutex::new(Quat::IDENTITY),
            ctx: Mutex::new(None),
        }
    }
}

impl Vantage for EguiVantage {
    fn orientation(&self) -> Quat {
        *self.orientation.lock().unwrap()
    }

    fn set_orientation(&self, orientation: Quat) {
        *self.orientation.lock().unwrap() = orientation;
    }

    fn render(&self) {
        if let Some(ctx) = self.ctx.lock().unwrap().as_ref() {
            ctx.request_repaint();
        }
    }
}

pub struct GuiPlayer {
    moves: Mutex<Vec<String>>,
    vantage: Arc<EguiVantage>,
}

impl GuiPlayer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            moves: Mutex::new(Vec::new()),
            vantage: Arc::new(EguiVantage::new()),
        })
    }

    /// Attach the egui context once the app shell exists; until then the
    /// player exposes no vantage and render requests go nowhere.
    pub fn attach_context(&self, ctx: egui::Context) {
        *self.vantage.ctx.lock().unwrap() = Some(ctx);
    }

    pub fn displayed_moves(&self) -> Vec<String> {
        self.moves.lock().unwrap().clone()
    }

    pub fn orientation(&self) -> Quat {
        self.vantage.orientation()
    }
}

impl CubePlayer for GuiPlayer {
    fn append_move(&self, notation: &str, _options: AppendOptions) {
        self.moves.lock().unwrap().push(notation.to_string());
    }

    fn set_state(&self, alg: &str) {
        let mut moves = self.moves.lock().unwrap();
        moves.clear();
        moves.extend(alg.split_whitespace().map(str::to_string));
    }

    fn vantages(&self) -> Vec<Arc<dyn Vantage>> {
        if self.vantage.ctx.lock().unwrap().is_some() {
            vec![self.vantage.clone()]
        } else {
            Vec::new()
        }
    }
}
