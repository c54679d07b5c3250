//! UI layer: app shell, the egui-backed player and the cube canvas.

pub mod app;
pub mod cube_canvas;
pub mod player;

pub use app::KockaApp;
