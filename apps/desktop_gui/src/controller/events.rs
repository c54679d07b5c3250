//! Events flowing from the backend worker to the egui thread.

use cube_core::DisplayUpdate;

pub enum UiEvent {
    Display(DisplayUpdate),
    Info(String),
}
